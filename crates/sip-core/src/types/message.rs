//! The top-level message types: [`Request`], [`Response`] and the [`Message`]
//! union that wraps either, plus the ordered header list shared by both.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::types::headers::{HeaderName, TypedHeader};
use crate::types::method::Method;
use crate::types::status::StatusCode;
use crate::types::transport::Source;
use crate::types::uri::Uri;

/// The SIP version carried by the start line. RFC 3261 defines only "2.0";
/// this exists so a wire-exact round trip doesn't have to special-case the string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const SIP_2_0: Version = Version { major: 2, minor: 0 };
}

impl Default for Version {
    fn default() -> Self {
        Version::SIP_2_0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIP/{}.{}", self.major, self.minor)
    }
}

/// An ordered header list, preserving wire order for headers whose order is
/// significant (`Via`, `Route`, `Record-Route`, `Contact`) and giving
/// case-insensitive, name-based lookup for everything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderList(pub Vec<TypedHeader>);

impl HeaderList {
    pub fn new() -> Self {
        HeaderList(Vec::new())
    }

    pub fn push(&mut self, header: TypedHeader) {
        self.0.push(header);
    }

    /// The first header with this name, if any.
    pub fn get(&self, name: &HeaderName) -> Option<&TypedHeader> {
        self.0.iter().find(|h| &h.name() == name)
    }

    /// Every header with this name, in wire order. Used for repeatable headers
    /// such as `Via`/`Route`/`Record-Route` that may appear as several lines.
    pub fn get_all<'a>(&'a self, name: &'a HeaderName) -> impl Iterator<Item = &'a TypedHeader> + 'a {
        self.0.iter().filter(move |h| &h.name() == name)
    }

    pub fn remove(&mut self, name: &HeaderName) {
        self.0.retain(|h| &h.name() != name);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypedHeader> {
        self.0.iter()
    }
}

/// A SIP request: `Request-Line *message-header CRLF [message-body]` (RFC 3261 §7.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
    pub headers: HeaderList,
    pub body: Bytes,
    #[serde(skip)]
    pub source: Option<Source>,
}

impl Request {
    pub fn new(method: Method, uri: Uri) -> Self {
        Request { method, uri, version: Version::default(), headers: HeaderList::new(), body: Bytes::new(), source: None }
    }

    pub fn with_header(mut self, header: TypedHeader) -> Self {
        self.headers.push(header);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn header(&self, name: &HeaderName) -> Option<&TypedHeader> {
        self.headers.get(name)
    }
}

/// A SIP response: `Status-Line *message-header CRLF [message-body]` (RFC 3261 §7.2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status_code: StatusCode,
    pub reason_phrase: String,
    pub version: Version,
    pub headers: HeaderList,
    pub body: Bytes,
    #[serde(skip)]
    pub source: Option<Source>,
}

impl Response {
    pub fn new(status_code: StatusCode) -> Self {
        let reason_phrase = status_code.reason_phrase().to_string();
        Response { status_code, reason_phrase, version: Version::default(), headers: HeaderList::new(), body: Bytes::new(), source: None }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason_phrase = reason.into();
        self
    }

    pub fn with_header(mut self, header: TypedHeader) -> Self {
        self.headers.push(header);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn header(&self, name: &HeaderName) -> Option<&TypedHeader> {
        self.headers.get(name)
    }

    pub fn is_provisional(&self) -> bool {
        self.status_code.is_provisional()
    }
}

/// The discriminated union every parsed or to-be-serialized SIP message is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    Request(Request),
    Response(Response),
}

impl Message {
    pub fn headers(&self) -> &HeaderList {
        match self {
            Message::Request(r) => &r.headers,
            Message::Response(r) => &r.headers,
        }
    }

    pub fn body(&self) -> &Bytes {
        match self {
            Message::Request(r) => &r.body,
            Message::Response(r) => &r.body,
        }
    }

    pub fn source(&self) -> Option<Source> {
        match self {
            Message::Request(r) => r.source,
            Message::Response(r) => r.source,
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(self, Message::Request(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Message::Response(_))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Request(r) => write!(f, "{} {} {}", r.method, r.uri, r.version),
            Message::Response(r) => write!(f, "{} {} {}", r.version, r.status_code.as_u16(), r.reason_phrase),
        }
    }
}
