//! The `Call-ID` header (RFC 3261 Section 20.10): an opaque identifier shared by
//! every message in a dialog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::headers::header::Header;
use crate::types::headers::header_name::HeaderName;
use crate::types::headers::header_value::HeaderValue;
use crate::types::headers::typed_header::TypedHeaderTrait;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub String);

impl CallId {
    pub fn new(value: impl Into<String>) -> Self {
        CallId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CallId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(Error::InvalidHeader("Call-ID must not be empty".to_string()));
        }
        Ok(CallId(s.trim().to_string()))
    }
}

impl TypedHeaderTrait for CallId {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::CallId
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::CallId(self.0.clone()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        match &header.value {
            HeaderValue::CallId(id) => Ok(CallId(id.clone())),
            HeaderValue::Raw(bytes) => CallId::from_str(&String::from_utf8_lossy(bytes)),
            other => Err(Error::InvalidHeader(format!("unexpected value for Call-ID: {:?}", other))),
        }
    }
}
