//! The `Max-Forwards` header (RFC 3261 Section 20.22): a hop-count guard against
//! routing loops. Conventionally initialized to 70.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::headers::header::Header;
use crate::types::headers::header_name::HeaderName;
use crate::types::headers::header_value::HeaderValue;
use crate::types::headers::typed_header::TypedHeaderTrait;

pub const DEFAULT_MAX_FORWARDS: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaxForwards(pub u8);

impl Default for MaxForwards {
    fn default() -> Self {
        MaxForwards(DEFAULT_MAX_FORWARDS)
    }
}

impl fmt::Display for MaxForwards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TypedHeaderTrait for MaxForwards {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::MaxForwards
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::UInt(self.0 as u32))
    }

    fn from_header(header: &Header) -> Result<Self> {
        match &header.value {
            HeaderValue::UInt(n) => u8::try_from(*n)
                .map(MaxForwards)
                .map_err(|_| Error::InvalidHeader("Max-Forwards out of range".to_string())),
            HeaderValue::Raw(bytes) => String::from_utf8_lossy(bytes)
                .trim()
                .parse::<u8>()
                .map(MaxForwards)
                .map_err(|e| Error::InvalidHeader(format!("invalid Max-Forwards: {}", e))),
            other => Err(Error::InvalidHeader(format!("unexpected value for Max-Forwards: {:?}", other))),
        }
    }
}
