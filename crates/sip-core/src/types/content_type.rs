//! The `Content-Type` header (RFC 3261 Section 20.15): a MIME type plus parameters.
//! The body itself (SDP interpretation, multipart splitting beyond the boundary
//! parameter) is outside this stack's scope; this type only carries the label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::headers::header::Header;
use crate::types::headers::header_name::HeaderName;
use crate::types::headers::header_value::HeaderValue;
use crate::types::headers::typed_header::TypedHeaderTrait;
use crate::types::param::Param;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentType {
    pub mime_type: String,
    pub params: Vec<Param>,
}

impl ContentType {
    pub fn new(mime_type: impl Into<String>) -> Self {
        ContentType { mime_type: mime_type.into(), params: Vec::new() }
    }

    /// The `boundary` parameter used to split a `multipart/*` body into parts.
    pub fn boundary(&self) -> Option<&str> {
        self.params.iter().find_map(|p| match p {
            Param::Other(k, Some(v)) if k.eq_ignore_ascii_case("boundary") => v.as_str(),
            _ => None,
        })
    }

    pub fn is_multipart(&self) -> bool {
        self.mime_type.to_ascii_lowercase().starts_with("multipart/")
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mime_type)?;
        for p in &self.params {
            write!(f, ";{}", p)?;
        }
        Ok(())
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::headers::parse_content_type_value(s.trim().as_bytes())
            .map(|(_, ct)| ct)
            .map_err(|e| Error::InvalidHeader(format!("invalid Content-Type: {:?}", e)))
    }
}

impl TypedHeaderTrait for ContentType {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::ContentType
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::ContentType(self.mime_type.clone(), self.params.clone()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        match &header.value {
            HeaderValue::ContentType(mime, params) => Ok(ContentType { mime_type: mime.clone(), params: params.clone() }),
            HeaderValue::Raw(bytes) => ContentType::from_str(&String::from_utf8_lossy(bytes)),
            other => Err(Error::InvalidHeader(format!("unexpected value for Content-Type: {:?}", other))),
        }
    }
}
