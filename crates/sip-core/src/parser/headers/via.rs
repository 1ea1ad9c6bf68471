//! Parser for the `Via` header (RFC 3261 Section 20.42):
//! `Via = ( "Via" / "v" ) HCOLON via-parm *(COMMA via-parm)`.

use std::str::FromStr;

use nom::{
    bytes::complete::{tag_no_case, take_while1},
    character::complete::char,
    combinator::{map, map_res, opt},
    multi::separated_list1,
    sequence::{pair, preceded, tuple},
};

use crate::parser::headers::generic_param;
use crate::parser::separators::comma;
use crate::parser::uri::ParseResult;
use crate::parser::whitespace::sws;
use crate::types::uri::Host;
use crate::types::via::{SentProtocol, ViaHeader};

fn protocol_name(input: &[u8]) -> ParseResult<&[u8]> {
    tag_no_case("SIP")(input)
}

fn protocol_version(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(|c: u8| c.is_ascii_digit() || c == b'.')(input)
}

fn transport(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(|c: u8| c.is_ascii_alphanumeric() || c == b'-' || c == b'_')(input)
}

fn sent_protocol(input: &[u8]) -> ParseResult<SentProtocol> {
    let (input, (name, _, version, _, transport)) = tuple((
        protocol_name,
        char('/'),
        protocol_version,
        char('/'),
        transport,
    ))(input)?;
    Ok((
        input,
        SentProtocol {
            name: String::from_utf8_lossy(name).to_ascii_uppercase(),
            version: String::from_utf8_lossy(version).into_owned(),
            transport: String::from_utf8_lossy(transport).to_ascii_uppercase(),
        },
    ))
}

fn domain_label(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(|c: u8| c.is_ascii_alphanumeric() || c == b'-' || c == b'_')(input)
}

fn hostname(input: &[u8]) -> ParseResult<Host> {
    map(
        nom::combinator::recognize(pair(domain_label, nom::multi::many0(pair(char('.'), domain_label)))),
        |b: &[u8]| Host::Domain(String::from_utf8_lossy(b).into_owned()),
    )(input)
}

fn ipv6_host(input: &[u8]) -> ParseResult<Host> {
    let (input, _) = char('[')(input)?;
    let (input, bytes) = take_while1(|c: u8| c != b']')(input)?;
    let (input, _) = char(']')(input)?;
    let addr = std::net::Ipv6Addr::from_str(std::str::from_utf8(bytes).unwrap_or(""))
        .map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify)))?;
    Ok((input, Host::Address(std::net::IpAddr::V6(addr))))
}

fn ipv4_host(input: &[u8]) -> ParseResult<Host> {
    map_res(
        nom::combinator::recognize(tuple((
            take_while1(|c: u8| c.is_ascii_digit()),
            char('.'),
            take_while1(|c: u8| c.is_ascii_digit()),
            char('.'),
            take_while1(|c: u8| c.is_ascii_digit()),
            char('.'),
            take_while1(|c: u8| c.is_ascii_digit()),
        ))),
        |b: &[u8]| {
            std::net::Ipv4Addr::from_str(std::str::from_utf8(b).unwrap_or(""))
                .map(|a| Host::Address(std::net::IpAddr::V4(a)))
        },
    )(input)
}

fn sent_by_host(input: &[u8]) -> ParseResult<Host> {
    nom::branch::alt((ipv6_host, ipv4_host, hostname))(input)
}

fn sent_by_port(input: &[u8]) -> ParseResult<u16> {
    preceded(
        char(':'),
        map_res(take_while1(|c: u8| c.is_ascii_digit()), |b: &[u8]| {
            std::str::from_utf8(b).unwrap_or("0").parse::<u16>()
        }),
    )(input)
}

fn via_params(input: &[u8]) -> ParseResult<Vec<crate::types::param::Param>> {
    nom::multi::many0(preceded(pair(sws, crate::parser::separators::semi), preceded(sws, generic_param)))(input)
}

fn via_parm(input: &[u8]) -> ParseResult<ViaHeader> {
    let (input, sent_protocol) = sent_protocol(input)?;
    let (input, _) = take_while1(|c: u8| c == b' ' || c == b'\t')(input)?;
    let (input, sent_by_host) = sent_by_host(input)?;
    let (input, sent_by_port) = opt(sent_by_port)(input)?;
    let (input, params) = via_params(input)?;
    Ok((input, ViaHeader { sent_protocol, sent_by_host, sent_by_port, params }))
}

/// Parses one or more comma-separated `via-parm` entries, as found in a single
/// (possibly folded) `Via` header value.
pub fn parse_via_params_public(input: &[u8]) -> ParseResult<Vec<ViaHeader>> {
    separated_list1(preceded(sws, comma), preceded(sws, via_parm))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::combinator::all_consuming;

    #[test]
    fn parses_single_via() {
        let (_, vias) = all_consuming(parse_via_params_public)(b"SIP/2.0/UDP pc33.atlanta.com:5060;branch=z9hG4bK776asdhds").unwrap();
        assert_eq!(vias.len(), 1);
        assert_eq!(vias[0].sent_protocol.transport, "UDP");
        assert_eq!(vias[0].sent_by_port, Some(5060));
    }

    #[test]
    fn parses_multiple_via_entries() {
        let (_, vias) = all_consuming(parse_via_params_public)(
            b"SIP/2.0/UDP first.example.com;branch=z9hG4bK1, SIP/2.0/UDP second.example.com;branch=z9hG4bK2",
        )
        .unwrap();
        assert_eq!(vias.len(), 2);
    }

    #[test]
    fn parses_ipv6_sent_by_host() {
        let (_, vias) = all_consuming(parse_via_params_public)(b"SIP/2.0/TCP [2001:db8::1]:5060;branch=z9hG4bKabc").unwrap();
        assert_eq!(vias[0].sent_by_host, Host::Address("2001:db8::1".parse().unwrap()));
    }
}
