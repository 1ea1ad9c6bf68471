//! The value half of a parsed [`Header`](super::header::Header).
//!
//! Values start out `Raw` as produced by the line-level parser; per-header typed
//! parsers then replace `Raw` with a structured variant for the headers this
//! stack recognizes (see [`crate::types::headers::header_name::HeaderName`]).

use std::fmt;

use crate::types::address::Address;
use crate::types::method::Method;
use crate::types::param::Param;
use crate::types::via::ViaHeader;

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    /// Unparsed header value text, used for any header this stack doesn't
    /// give a dedicated representation to.
    Raw(Vec<u8>),
    Via(Vec<ViaHeader>),
    /// `From`/`To`, and a single `Contact` entry.
    Address(Address),
    /// `Contact`/`Route`/`Record-Route`, which may carry more than one entry.
    Addresses(Vec<Address>),
    CallId(String),
    CSeq(u32, Method),
    /// `Content-Length`, `Max-Forwards`, `Expires`.
    UInt(u32),
    ContentType(String, Vec<Param>),
}

impl HeaderValue {
    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            HeaderValue::Raw(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Raw(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            HeaderValue::Via(vias) => {
                let parts: Vec<String> = vias.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(", "))
            }
            HeaderValue::Address(addr) => write!(f, "{}", addr),
            HeaderValue::Addresses(addrs) => {
                let parts: Vec<String> = addrs.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(", "))
            }
            HeaderValue::CallId(id) => f.write_str(id),
            HeaderValue::CSeq(n, m) => write!(f, "{} {}", n, m),
            HeaderValue::UInt(n) => write!(f, "{}", n),
            HeaderValue::ContentType(mime, params) => {
                write!(f, "{}", mime)?;
                for p in params {
                    write!(f, ";{}", p)?;
                }
                Ok(())
            }
        }
    }
}
