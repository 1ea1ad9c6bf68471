//! The generic, name-plus-value representation every header is first parsed into.

use std::fmt;

use crate::types::headers::header_name::HeaderName;
use crate::types::headers::header_value::HeaderValue;

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub name: HeaderName,
    pub value: HeaderValue,
}

impl Header {
    pub fn new(name: HeaderName, value: HeaderValue) -> Self {
        Header { name, value }
    }

    /// Builds a header carrying a raw, unparsed string value.
    pub fn text(name: HeaderName, value: impl Into<String>) -> Self {
        Header { name, value: HeaderValue::Raw(value.into().into_bytes()) }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
