//! A shared representation for the `From`, `To` and `Contact` header values,
//! all of which are a `display_name? uri *(;parameter)` per RFC 3261 §20.10/.20/.39.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::param::Param;
use crate::types::uri::Uri;

/// A display-name-plus-URI-plus-parameters value, as used by `From`, `To` and `Contact`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub display_name: Option<String>,
    pub uri: Uri,
    pub params: Vec<Param>,
}

impl Address {
    pub fn new(uri: Uri) -> Self {
        Address { display_name: None, uri, params: Vec::new() }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// The `tag` parameter, which identifies a dialog participant in `From`/`To`.
    pub fn tag(&self) -> Option<&str> {
        self.params.iter().find_map(|p| p.tag_value())
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.params.retain(|p| !matches!(p, Param::Tag(_)));
        self.params.push(Param::tag(tag));
    }

    /// The `expires` parameter, used by `Contact` in REGISTER/200 OK exchanges.
    pub fn expires(&self) -> Option<u32> {
        self.params.iter().find_map(|p| match p {
            Param::Expires(v) => Some(*v),
            _ => None,
        })
    }

    pub fn param(&self, key: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) if !name.is_empty() => {
                if name.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '.') {
                    write!(f, "{} <{}>", name, self.uri)?;
                } else {
                    write!(f, "\"{}\" <{}>", name.replace('"', "\\\""), self.uri)?;
                }
            }
            _ => write!(f, "<{}>", self.uri)?,
        }
        for param in &self.params {
            write!(f, ";{}", param)?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, addr) = crate::parser::headers::parse_address(s.as_bytes())
            .map_err(|e| Error::ParseError(format!("invalid address value: {:?}", e)))?;
        Ok(addr)
    }
}
