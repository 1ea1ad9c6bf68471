//! Turns a [`Request`]/[`Response`] back into wire bytes (RFC 3261 §7, §20).
//!
//! Complements [`crate::parser`]: parsing is lossy in exactly the ways
//! RFC 3261 §7.3.1 allows (line-folding, compact forms, whitespace runs);
//! serialization re-establishes a canonical wire form rather than attempting
//! a byte-exact echo of whatever was parsed.

use std::fmt::Write as _;

use bytes::{BufMut, Bytes, BytesMut};
use rand::RngCore;

use crate::types::headers::{HeaderName, TypedHeader};
use crate::types::message::{Request, Response};
use crate::types::param::Param;
use crate::types::transport::TransportKind;
use crate::types::via::{SentProtocol, Via, ViaHeader};

/// The fixed emission order RFC 3261's examples use and this stack's
/// serializer follows for the headers it recognizes; anything else is
/// appended afterward in whatever order it was set.
const HEADER_ORDER: &[HeaderName] = &[
    HeaderName::Via,
    HeaderName::From,
    HeaderName::To,
    HeaderName::CallId,
    HeaderName::CSeq,
    HeaderName::MaxForwards,
    HeaderName::Route,
    HeaderName::RecordRoute,
    HeaderName::Contact,
    HeaderName::ContentType,
    HeaderName::ContentLength,
];

/// Transport-level context a message is being serialized for: needed to
/// synthesize a top `Via` when a request doesn't already carry one.
#[derive(Debug, Clone)]
pub struct SerializeContext {
    pub transport: TransportKind,
    pub local_host: String,
    pub local_port: u16,
}

impl SerializeContext {
    pub fn new(transport: TransportKind, local_host: impl Into<String>, local_port: u16) -> Self {
        SerializeContext { transport, local_host: local_host.into(), local_port }
    }

    pub fn udp(local_host: impl Into<String>, local_port: u16) -> Self {
        SerializeContext::new(TransportKind::Udp, local_host, local_port)
    }
}

/// A fresh RFC 3261 §8.1.1.7 branch: the magic cookie plus 64 bits of
/// lowercase-hex entropy.
pub fn fresh_branch() -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    let mut branch = String::from("z9hG4bK");
    for b in bytes {
        let _ = write!(branch, "{:02x}", b);
    }
    branch
}

/// Serializes a request, inserting a top `Via` (with a fresh branch) and
/// `Max-Forwards: 70` if either is absent, and (re)writing `Content-Length`
/// to match the body, per RFC 3261 §4.1 Serialize.
pub fn serialize_request(request: &Request, ctx: &SerializeContext) -> Bytes {
    let mut headers = request.headers.clone();

    if headers.get(&HeaderName::Via).is_none() {
        let via = Via(vec![ViaHeader {
            sent_protocol: SentProtocol {
                name: "SIP".to_string(),
                version: "2.0".to_string(),
                transport: ctx.transport.as_str().to_string(),
            },
            sent_by_host: crate::types::uri::Host::domain(ctx.local_host.clone()),
            sent_by_port: Some(ctx.local_port),
            params: vec![Param::branch(fresh_branch())],
        }]);
        headers.0.insert(0, TypedHeader::Via(via));
    }

    if headers.get(&HeaderName::MaxForwards).is_none() {
        headers.push(TypedHeader::MaxForwards(crate::types::max_forwards::MaxForwards::default()));
    }

    let mut out = BytesMut::new();
    out.put_slice(format!("{} {} {}\r\n", request.method, request.uri, request.version).as_bytes());
    write_headers(&mut out, &headers, request.body.len());
    out.put_slice(b"\r\n");
    out.put_slice(&request.body);
    out.freeze()
}

/// Serializes a response, (re)writing `Content-Length` to match the body.
/// Responses never get a synthesized `Via` — RFC 3261 requires the server
/// to copy the request's Via set unchanged, which is the caller's job.
pub fn serialize_response(response: &Response) -> Bytes {
    let headers = response.headers.clone();

    let mut out = BytesMut::new();
    out.put_slice(format!("{} {} {}\r\n", response.version, response.status_code.as_u16(), response.reason_phrase).as_bytes());
    write_headers(&mut out, &headers, response.body.len());
    out.put_slice(b"\r\n");
    out.put_slice(&response.body);
    out.freeze()
}

fn write_headers(out: &mut BytesMut, headers: &crate::types::message::HeaderList, body_len: usize) {
    let mut written = vec![false; headers.0.len()];

    for name in HEADER_ORDER {
        if *name == HeaderName::ContentLength {
            write_line(out, &HeaderName::ContentLength, &body_len.to_string());
            for (i, h) in headers.0.iter().enumerate() {
                if &h.name() == name {
                    written[i] = true;
                }
            }
            continue;
        }
        for (i, h) in headers.0.iter().enumerate() {
            if written[i] || &h.name() != name {
                continue;
            }
            write_line(out, name, &h.to_header().value.to_string());
            written[i] = true;
        }
    }

    // HEADER_ORDER always covers Content-Length, so anything left over here
    // is either a header outside the fixed ordering or a duplicate entry.
    for (i, h) in headers.0.iter().enumerate() {
        if written[i] {
            continue;
        }
        write_line(out, &h.name(), &h.to_header().value.to_string());
    }
}

/// Writes one logical header as `Name: value\r\n`, folding the value at
/// whitespace boundaries if it exceeds 75 columns (RFC 3261 §7.3.1).
fn write_line(out: &mut BytesMut, name: &HeaderName, value: &str) {
    out.put_slice(canonical_case(name).as_bytes());
    out.put_slice(b": ");
    out.put_slice(fold(value).as_bytes());
    out.put_slice(b"\r\n");
}

/// The case RFC 3261 §20 uses for each header name in its own examples;
/// headers outside that fixed set are title-cased per hyphen segment.
fn canonical_case(name: &HeaderName) -> String {
    match name {
        HeaderName::CallId => "Call-ID".to_string(),
        HeaderName::CSeq => "CSeq".to_string(),
        HeaderName::Other(raw) => match raw.to_ascii_lowercase().as_str() {
            "www-authenticate" => "WWW-Authenticate".to_string(),
            "mime-version" => "MIME-Version".to_string(),
            "content-id" => "Content-ID".to_string(),
            _ => raw
                .split('-')
                .map(|seg| {
                    let mut c = seg.chars();
                    match c.next() {
                        Some(first) => first.to_ascii_uppercase().to_string() + &c.as_str().to_ascii_lowercase(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<_>>()
                .join("-"),
        },
        other => other.as_str().to_string(),
    }
}

/// Folds a header value at word boundaries once it exceeds 75 columns,
/// continuation lines beginning with a single SP (RFC 3261 §7.3.1).
fn fold(value: &str) -> String {
    const MAX_COLUMN: usize = 75;
    if value.len() <= MAX_COLUMN {
        return value.to_string();
    }
    let mut out = String::new();
    let mut column = 0;
    for (i, word) in value.split(' ').enumerate() {
        if i > 0 {
            if column + 1 + word.len() > MAX_COLUMN {
                out.push_str("\r\n ");
                column = 1;
            } else {
                out.push(' ');
                column += 1;
            }
        }
        out.push_str(word);
        column += word.len();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::message::parse_message;
    use crate::types::message::Message;
    use crate::types::method::Method;
    use crate::types::uri::Uri;

    #[test]
    fn inserts_via_and_max_forwards_when_absent() {
        let request = Request::new(Method::Invite, Uri::sip("bob@example.com"))
            .with_header(TypedHeader::CallId(crate::types::call_id::CallId::new("abc")));
        let bytes = serialize_request(&request, &SerializeContext::udp("pc33.atlanta.com", 5060));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("Via: SIP/2.0/UDP pc33.atlanta.com:5060;branch=z9hG4bK"));
        assert!(text.contains("Max-Forwards: 70"));
        assert!(text.contains("Content-Length: 0"));
    }

    #[test]
    fn content_length_matches_body() {
        let request = Request::new(Method::Invite, Uri::sip("bob@example.com")).with_body(Bytes::from_static(b"abcd"));
        let bytes = serialize_request(&request, &SerializeContext::udp("pc33.atlanta.com", 5060));
        assert!(String::from_utf8_lossy(&bytes).contains("Content-Length: 4"));
    }

    #[test]
    fn round_trip_preserves_method_and_uri() {
        use crate::types::address::Address;
        use crate::types::cseq::CSeq;

        let request = Request::new(Method::Bye, Uri::sip("bob@example.com"))
            .with_header(TypedHeader::CallId(crate::types::call_id::CallId::new("abc")))
            .with_header(TypedHeader::From(Address::new(Uri::sip("alice@atlanta.com")).with_param(Param::tag("1928301774"))))
            .with_header(TypedHeader::To(Address::new(Uri::sip("bob@example.com")).with_param(Param::tag("a6c85cf"))))
            .with_header(TypedHeader::CSeq(CSeq::new(2, Method::Bye)));
        let bytes = serialize_request(&request, &SerializeContext::udp("pc33.atlanta.com", 5060));
        let Message::Request(parsed) = parse_message(&bytes).unwrap() else { panic!("expected request") };
        assert_eq!(parsed.method, Method::Bye);
        assert_eq!(parsed.uri.to_string(), "sip:bob@example.com");
    }
}
