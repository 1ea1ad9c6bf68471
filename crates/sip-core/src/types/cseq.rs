//! The `CSeq` header (RFC 3261 Section 20.16): a sequence number plus the
//! method it was issued for.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::headers::header::Header;
use crate::types::headers::header_name::HeaderName;
use crate::types::headers::header_value::HeaderValue;
use crate::types::headers::typed_header::TypedHeaderTrait;
use crate::types::method::Method;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CSeq {
    pub number: u32,
    pub method: Method,
}

impl CSeq {
    pub fn new(number: u32, method: Method) -> Self {
        CSeq { number, method }
    }
}

impl fmt::Display for CSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.method)
    }
}

impl TypedHeaderTrait for CSeq {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::CSeq
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::CSeq(self.number, self.method.clone()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        match &header.value {
            HeaderValue::CSeq(number, method) => Ok(CSeq { number: *number, method: method.clone() }),
            HeaderValue::Raw(bytes) => {
                let s = String::from_utf8_lossy(bytes);
                crate::parser::headers::parse_cseq_value(s.trim().as_bytes())
                    .map(|(_, cseq)| cseq)
                    .map_err(|e| Error::InvalidHeader(format!("invalid CSeq value: {:?}", e)))
            }
            other => Err(Error::InvalidHeader(format!("unexpected value for CSeq: {:?}", other))),
        }
    }
}
