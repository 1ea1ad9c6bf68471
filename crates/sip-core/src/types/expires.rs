//! The `Expires` header (RFC 3261 Section 20.19). Also the default lifetime
//! used for a NOTIFY-driven subscription when the header is absent.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::headers::header::Header;
use crate::types::headers::header_name::HeaderName;
use crate::types::headers::header_value::HeaderValue;
use crate::types::headers::typed_header::TypedHeaderTrait;

pub const DEFAULT_SUBSCRIPTION_EXPIRES: u32 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expires(pub u32);

impl fmt::Display for Expires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TypedHeaderTrait for Expires {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::Expires
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::UInt(self.0))
    }

    fn from_header(header: &Header) -> Result<Self> {
        match &header.value {
            HeaderValue::UInt(n) => Ok(Expires(*n)),
            HeaderValue::Raw(bytes) => String::from_utf8_lossy(bytes)
                .trim()
                .parse::<u32>()
                .map(Expires)
                .map_err(|e| Error::InvalidHeader(format!("invalid Expires: {}", e))),
            other => Err(Error::InvalidHeader(format!("unexpected value for Expires: {:?}", other))),
        }
    }
}
