//! Parsers for header *values* that need more than a byte-for-byte copy: the
//! `display-name? addr-spec *(SEMI generic-param)` grammar shared by
//! `From`/`To`/`Contact`/`Route`/`Record-Route`, plus `CSeq` and `Content-Type`.

use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{map, map_res, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{pair, preceded, tuple},
    IResult,
};

use crate::parser::separators::{comma, laquot, raquot, semi};
use crate::parser::uri::parse_uri;
use crate::parser::whitespace::sws;
use crate::types::address::Address;
use crate::types::content_type::ContentType;
use crate::types::cseq::CSeq;
use crate::types::method::Method;
use crate::types::param::{GenericValue, Param};

pub mod via;

pub type ParseResult<'a, O> = IResult<&'a [u8], O>;

fn token(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(|c: u8| {
        c.is_ascii_alphanumeric() || matches!(c, b'-' | b'.' | b'!' | b'%' | b'*' | b'_' | b'+' | b'`' | b'\'' | b'~')
    })(input)
}

fn quoted_string(input: &[u8]) -> ParseResult<String> {
    let (input, _) = char('"')(input)?;
    let (input, bytes) = recognize(many0(alt((
        recognize(tuple((char('\\'), nom::bytes::complete::take(1usize)))),
        recognize(take_while1(|c: u8| c != b'"' && c != b'\\')),
    ))))(input)?;
    let (input, _) = char('"')(input)?;
    let unescaped = String::from_utf8_lossy(bytes).replace("\\\"", "\"").replace("\\\\", "\\");
    Ok((input, unescaped))
}

fn display_name(input: &[u8]) -> ParseResult<Option<String>> {
    alt((
        map(quoted_string, Some),
        map(
            recognize(many0(preceded(opt(char(' ')), token))),
            |bytes: &[u8]| {
                let s = String::from_utf8_lossy(bytes).trim().to_string();
                if s.is_empty() { None } else { Some(s) }
            },
        ),
    ))(input)
}

/// A `generic-param` as used after a Via/address/Route entry: `token (= (token / quoted-string))?`.
pub fn generic_param(input: &[u8]) -> ParseResult<Param> {
    let (input, name) = token(input)?;
    let name = String::from_utf8_lossy(name).to_lowercase();
    let (input, value) = opt(preceded(
        sws,
        preceded(char('='), preceded(sws, alt((map(quoted_string, GenericValue::Quoted), map(token, |b| GenericValue::Token(String::from_utf8_lossy(b).into_owned())))))),
    ))(input)?;

    let value_str = value.as_ref().map(|v| match v {
        GenericValue::Token(s) | GenericValue::Quoted(s) => s.clone(),
        GenericValue::Host(h) => h.to_string(),
    });

    let param = match (name.as_str(), value_str) {
        ("branch", Some(v)) => Param::Branch(v),
        ("tag", Some(v)) => Param::Tag(v),
        ("expires", Some(v)) => Param::Expires(v.parse().unwrap_or(0)),
        ("received", Some(v)) => v.parse().map(Param::Received).unwrap_or(Param::Other(name, value)),
        ("maddr", Some(v)) => Param::Maddr(v),
        ("ttl", Some(v)) => Param::Ttl(v.parse().unwrap_or(0)),
        ("lr", None) => Param::Lr,
        ("q", Some(v)) => v
            .parse::<f32>()
            .ok()
            .and_then(|f| ordered_float::NotNan::new(f).ok())
            .map(Param::Q)
            .unwrap_or(Param::Other(name, value)),
        ("transport", Some(v)) => Param::Transport(v),
        ("user", Some(v)) => Param::User(v),
        ("method", Some(v)) => Param::Method(v),
        ("handling", Some(v)) => Param::Handling(v),
        ("duration", Some(v)) => Param::Duration(v.parse().unwrap_or(0)),
        ("rport", Some(v)) => Param::Rport(v.parse().ok()),
        ("rport", None) => Param::Rport(None),
        (_, v) => Param::Other(name, v.map(GenericValue::from)),
    };
    Ok((input, param))
}

fn semicolon_params(input: &[u8]) -> ParseResult<Vec<Param>> {
    many0(preceded(pair(sws, semi), preceded(sws, generic_param)))(input)
}

/// `name-addr = [display-name] LAQUOT addr-spec RAQUOT`.
fn name_addr(input: &[u8]) -> ParseResult<Address> {
    let (input, name) = display_name(input)?;
    let (input, _) = preceded(sws, laquot)(input)?;
    let (input, uri) = parse_uri(input)?;
    let (input, _) = raquot(input)?;
    Ok((input, Address { display_name: name, uri, params: Vec::new() }))
}

/// `addr-spec`, used bare (without angle brackets) by `From`/`To` in the common case.
fn addr_spec(input: &[u8]) -> ParseResult<Address> {
    map(parse_uri, Address::new)(input)
}

/// A single `From`/`To`/`Contact` entry: `(name-addr / addr-spec) *(SEMI generic-param)`.
pub fn address_spec(input: &[u8]) -> ParseResult<Address> {
    let (input, mut addr) = alt((name_addr, addr_spec))(input)?;
    let (input, params) = semicolon_params(input)?;
    addr.params = params;
    Ok((input, addr))
}

/// Parses a single address value, such as a `From`/`To` header's content.
pub fn parse_address(input: &[u8]) -> ParseResult<Address> {
    preceded(sws, address_spec)(input)
}

/// Parses a comma-separated list of addresses, such as a `Contact`/`Route`/`Record-Route` value.
///
/// A bare `*` (used by `Contact` to mean "all current bindings") has no address
/// representation here; callers that need it check for it before calling this.
pub fn parse_address_list(input: &[u8]) -> ParseResult<Vec<Address>> {
    separated_list1(preceded(sws, comma), parse_address)(input)
}

/// Parses a `CSeq` value: `1*DIGIT LWS Method`.
pub fn parse_cseq_value(input: &[u8]) -> ParseResult<CSeq> {
    let (input, number) = map_res(take_while1(|c: u8| c.is_ascii_digit()), |b: &[u8]| {
        std::str::from_utf8(b).unwrap_or("0").parse::<u32>()
    })(input)?;
    let (input, _) = take_while1(|c: u8| c == b' ' || c == b'\t')(input)?;
    let (input, method_bytes) = take_while1(|c: u8| c != b' ' && c != b'\t' && c != b'\r' && c != b'\n')(input)?;
    let method = Method::from_str(&String::from_utf8_lossy(method_bytes))
        .map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify)))?;
    Ok((input, CSeq::new(number, method)))
}

/// Parses a `Content-Type` value: `media-type *(SEMI m-parameter)`.
pub fn parse_content_type_value(input: &[u8]) -> ParseResult<ContentType> {
    let (input, mime) = recognize(tuple((token, char('/'), token)))(input)?;
    let (input, params) = semicolon_params(input)?;
    Ok((input, ContentType { mime_type: String::from_utf8_lossy(mime).into_owned(), params }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::combinator::all_consuming;

    #[test]
    fn parses_name_addr_with_tag() {
        let (_, addr) = all_consuming(parse_address)(b"Alice <sip:alice@atlanta.com>;tag=1928301774").unwrap();
        assert_eq!(addr.display_name.as_deref(), Some("Alice"));
        assert_eq!(addr.tag(), Some("1928301774"));
    }

    #[test]
    fn parses_quoted_display_name() {
        let (_, addr) = all_consuming(parse_address)(b"\"Bob Smith\" <sip:bob@biloxi.com>").unwrap();
        assert_eq!(addr.display_name.as_deref(), Some("Bob Smith"));
    }

    #[test]
    fn parses_bare_addr_spec() {
        let (_, addr) = all_consuming(parse_address)(b"sip:alice@atlanta.com").unwrap();
        assert!(addr.display_name.is_none());
    }

    #[test]
    fn parses_contact_list_with_params() {
        let (_, list) = all_consuming(parse_address_list)(b"<sip:alice@pc1.atlanta.com>;expires=3600, <sip:alice@pc2.atlanta.com>").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].expires(), Some(3600));
    }

    #[test]
    fn parses_cseq() {
        let (_, cseq) = all_consuming(parse_cseq_value)(b"314159 INVITE").unwrap();
        assert_eq!(cseq.number, 314159);
        assert_eq!(cseq.method, Method::Invite);
    }

    #[test]
    fn parses_content_type_with_boundary() {
        let (_, ct) = all_consuming(parse_content_type_value)(b"multipart/mixed;boundary=boundary1").unwrap();
        assert_eq!(ct.mime_type, "multipart/mixed");
        assert_eq!(ct.boundary(), Some("boundary1"));
    }
}
