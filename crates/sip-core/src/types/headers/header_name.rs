//! SIP header names (RFC 3261 Section 20) and their compact-form aliases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A SIP header name.
///
/// Structured variants cover the headers this stack gives a typed
/// representation to (RFC 3261 Section 20 defines dozens more; those are
/// carried as `Other` with their canonical wire-form name preserved).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderName {
    Via,
    From,
    To,
    Contact,
    CallId,
    CSeq,
    MaxForwards,
    ContentLength,
    ContentType,
    Expires,
    Route,
    RecordRoute,
    /// Any header this stack doesn't give a dedicated typed representation,
    /// stored with its canonical (non-compact) wire name.
    Other(String),
}

impl HeaderName {
    /// Returns the canonical (non-compact) wire-form name for this header.
    pub fn as_str(&self) -> &str {
        match self {
            HeaderName::Via => "Via",
            HeaderName::From => "From",
            HeaderName::To => "To",
            HeaderName::Contact => "Contact",
            HeaderName::CallId => "Call-ID",
            HeaderName::CSeq => "CSeq",
            HeaderName::MaxForwards => "Max-Forwards",
            HeaderName::ContentLength => "Content-Length",
            HeaderName::ContentType => "Content-Type",
            HeaderName::Expires => "Expires",
            HeaderName::Route => "Route",
            HeaderName::RecordRoute => "Record-Route",
            HeaderName::Other(s) => s.as_str(),
        }
    }

    /// Returns the header's single-letter compact form, where RFC 3261 §20 defines one.
    pub fn compact_form(&self) -> Option<&'static str> {
        match self {
            HeaderName::Via => Some("v"),
            HeaderName::From => Some("f"),
            HeaderName::To => Some("t"),
            HeaderName::Contact => Some("m"),
            HeaderName::CallId => Some("i"),
            HeaderName::ContentType => Some("c"),
            HeaderName::ContentLength => Some("l"),
            _ => None,
        }
    }

    /// True for headers whose on-the-wire order matters and which may
    /// legally repeat: `Via`, `Route`, `Record-Route`, `Contact`.
    pub fn is_repeatable(&self) -> bool {
        matches!(
            self,
            HeaderName::Via | HeaderName::Route | HeaderName::RecordRoute | HeaderName::Contact
        )
    }

    fn from_canonical(lower: &str) -> Option<Self> {
        Some(match lower {
            "via" => HeaderName::Via,
            "from" => HeaderName::From,
            "to" => HeaderName::To,
            "contact" => HeaderName::Contact,
            "call-id" => HeaderName::CallId,
            "cseq" => HeaderName::CSeq,
            "max-forwards" => HeaderName::MaxForwards,
            "content-length" => HeaderName::ContentLength,
            "content-type" => HeaderName::ContentType,
            "expires" => HeaderName::Expires,
            "route" => HeaderName::Route,
            "record-route" => HeaderName::RecordRoute,
            _ => return None,
        })
    }

    /// Expands a single-letter compact token (RFC 3261 §7.3.3, as used in the
    /// parser's compact-header table) into the full header name it stands for.
    ///
    /// Only the letters the compact-header table names are recognized here;
    /// anything else is handled by the caller as a literal header name.
    pub fn expand_compact(token: &str) -> Option<&'static str> {
        Some(match token.to_ascii_lowercase().as_str() {
            "v" => "via",
            "i" => "call-id",
            "m" => "contact",
            "e" => "content-encoding",
            "l" => "content-length",
            "c" => "content-type",
            "f" => "from",
            "s" => "subject",
            "k" => "supported",
            "t" => "to",
            "o" => "event",
            "r" => "refer-to",
            "b" => "referred-by",
            "u" => "allow-events",
            "y" => "identity",
            "d" => "request-disposition",
            "j" => "reject-contact",
            "a" => "accept-contact",
            "x" => "session-expires",
            _ => return None,
        })
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidHeader("empty header name".to_string()));
        }
        let lower = s.to_ascii_lowercase();
        let expanded = if lower.len() == 1 {
            HeaderName::expand_compact(&lower).map(str::to_string).unwrap_or(lower)
        } else {
            lower
        };
        Ok(HeaderName::from_canonical(&expanded).unwrap_or_else(|| {
            // Preserve the caller's original casing for unrecognized headers,
            // but canonicalize multi-word names to Title-Case-With-Hyphens.
            HeaderName::Other(title_case(s))
        }))
    }
}

fn title_case(name: &str) -> String {
    name.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_and_compact_names() {
        assert_eq!(HeaderName::from_str("Via").unwrap(), HeaderName::Via);
        assert_eq!(HeaderName::from_str("v").unwrap(), HeaderName::Via);
        assert_eq!(HeaderName::from_str("CSeq").unwrap(), HeaderName::CSeq);
        assert_eq!(HeaderName::from_str("Call-ID").unwrap(), HeaderName::CallId);
        assert_eq!(HeaderName::from_str("i").unwrap(), HeaderName::CallId);
    }

    #[test]
    fn preserves_extension_header_names() {
        let custom = HeaderName::from_str("X-Custom-Header").unwrap();
        assert!(matches!(custom, HeaderName::Other(ref s) if s == "X-Custom-Header"));
    }

    #[test]
    fn rejects_empty_name() {
        assert!(HeaderName::from_str("").is_err());
    }
}
