//! The `Content-Length` header (RFC 3261 Section 20.14).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::headers::header::Header;
use crate::types::headers::header_name::HeaderName;
use crate::types::headers::header_value::HeaderValue;
use crate::types::headers::typed_header::TypedHeaderTrait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentLength(pub u32);

impl fmt::Display for ContentLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TypedHeaderTrait for ContentLength {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::ContentLength
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::UInt(self.0))
    }

    fn from_header(header: &Header) -> Result<Self> {
        match &header.value {
            HeaderValue::UInt(n) => Ok(ContentLength(*n)),
            HeaderValue::Raw(bytes) => String::from_utf8_lossy(bytes)
                .trim()
                .parse::<u32>()
                .map(ContentLength)
                .map_err(|e| Error::InvalidHeader(format!("invalid Content-Length: {}", e))),
            other => Err(Error::InvalidHeader(format!("unexpected value for Content-Length: {:?}", other))),
        }
    }
}
