//! Parser for the SIP URI grammar (RFC 3261 Section 25.1, `SIP-URI` / `SIPS-URI` / absoluteURI).

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while, take_while1, take_while_m_n},
    character::complete::char,
    combinator::{map, map_res, opt, recognize},
    multi::many0,
    sequence::{pair, preceded, separated_pair, tuple},
    IResult,
};

use crate::parser::utils::unescape_uri_component;
use crate::types::param::Param;
use crate::types::uri::{Host, Scheme, Uri};

pub type ParseResult<'a, O> = IResult<&'a [u8], O>;

fn is_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

fn is_user_unreserved(c: u8) -> bool {
    matches!(c, b'&' | b'=' | b'+' | b'$' | b',' | b';' | b'?' | b'/')
}

fn is_param_unreserved(c: u8) -> bool {
    matches!(c, b'[' | b']' | b'/' | b':' | b'&' | b'+' | b'$')
}

fn escaped(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((
        char('%'),
        take_while_m_n(2, 2, |c: u8| c.is_ascii_hexdigit()),
    )))(input)
}

fn user_chars(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(many0(alt((
        recognize(nom::bytes::complete::take_while1(|c: u8| {
            is_unreserved(c) || is_user_unreserved(c)
        })),
        escaped,
    ))))(input)
}

fn password_chars(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(many0(alt((
        recognize(take_while1(|c: u8| {
            is_unreserved(c) || matches!(c, b'&' | b'=' | b'+' | b'$' | b',')
        })),
        escaped,
    ))))(input)
}

fn scheme(input: &[u8]) -> ParseResult<Scheme> {
    map(
        alt((
            tag_no_case("sips"),
            tag_no_case("sip"),
            tag_no_case("tel"),
        )),
        |s: &[u8]| Scheme::from_str(std::str::from_utf8(s).unwrap_or("sip")).unwrap_or(Scheme::Sip),
    )(input)
}

fn userinfo(input: &[u8]) -> ParseResult<(String, Option<String>)> {
    let (input, (user, password)) = pair(
        user_chars,
        opt(preceded(char(':'), password_chars)),
    )(input)?;
    let (input, _) = char('@')(input)?;
    let user = unescape_uri_component(user).unwrap_or_else(|_| String::from_utf8_lossy(user).into_owned());
    let password = password
        .map(|p| unescape_uri_component(p).unwrap_or_else(|_| String::from_utf8_lossy(p).into_owned()));
    Ok((input, (user, password)))
}

fn domain_label(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(|c: u8| c.is_ascii_alphanumeric() || c == b'-' || c == b'_')(input)
}

fn hostname(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(pair(
        domain_label,
        many0(pair(char('.'), domain_label)),
    ))(input)
}

fn ipv4_address(input: &[u8]) -> ParseResult<Ipv4Addr> {
    map_res(
        recognize(tuple((
            take_while_m_n(1, 3, |c: u8| c.is_ascii_digit()),
            char('.'),
            take_while_m_n(1, 3, |c: u8| c.is_ascii_digit()),
            char('.'),
            take_while_m_n(1, 3, |c: u8| c.is_ascii_digit()),
            char('.'),
            take_while_m_n(1, 3, |c: u8| c.is_ascii_digit()),
        ))),
        |bytes: &[u8]| Ipv4Addr::from_str(std::str::from_utf8(bytes).unwrap()),
    )(input)
}

fn ipv6_reference(input: &[u8]) -> ParseResult<Ipv6Addr> {
    let (input, _) = char('[')(input)?;
    let (input, bytes) = take_while1(|c: u8| c != b']')(input)?;
    let (input, _) = char(']')(input)?;
    let addr = Ipv6Addr::from_str(std::str::from_utf8(bytes).unwrap_or(""))
        .map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify)))?;
    Ok((input, addr))
}

fn host(input: &[u8]) -> ParseResult<Host> {
    alt((
        map(ipv6_reference, |a| Host::Address(IpAddr::V6(a))),
        map(ipv4_address, |a| Host::Address(IpAddr::V4(a))),
        map(hostname, |b| Host::Domain(String::from_utf8_lossy(b).into_owned())),
    ))(input)
}

fn port(input: &[u8]) -> ParseResult<u16> {
    preceded(
        char(':'),
        map_res(take_while1(|c: u8| c.is_ascii_digit()), |b: &[u8]| {
            std::str::from_utf8(b).unwrap_or("0").parse::<u16>()
        }),
    )(input)
}

fn pname(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(many0(alt((
        take_while1(|c: u8| is_unreserved(c) || is_param_unreserved(c)),
        escaped,
    ))))(input)
}

fn pvalue(input: &[u8]) -> ParseResult<&[u8]> {
    pname(input)
}

fn uri_parameter(input: &[u8]) -> ParseResult<Param> {
    let (input, (name, value)) = separated_pair(pname, opt(char('=')), opt(pvalue))(input)?;
    let name_str = String::from_utf8_lossy(name).to_lowercase();
    let value_str = value.map(|v| {
        unescape_uri_component(v).unwrap_or_else(|_| String::from_utf8_lossy(v).into_owned())
    });

    let param = match (name_str.as_str(), value_str) {
        ("transport", Some(v)) => Param::Transport(v),
        ("user", Some(v)) => Param::User(v),
        ("method", Some(v)) => Param::Method(v),
        ("ttl", Some(v)) => Param::Ttl(v.parse().unwrap_or(0)),
        ("maddr", Some(v)) => Param::Maddr(v),
        ("lr", None) => Param::Lr,
        ("branch", Some(v)) => Param::Branch(v),
        ("tag", Some(v)) => Param::Tag(v),
        (other, v) => Param::Other(other.to_string(), v.map(|s| s.into())),
    };
    Ok((input, param))
}

fn uri_parameters(input: &[u8]) -> ParseResult<Vec<Param>> {
    many0(preceded(char(';'), uri_parameter))(input)
}

fn hname_hvalue(input: &[u8]) -> ParseResult<(String, String)> {
    separated_pair(
        map(pname, |b| String::from_utf8_lossy(b).into_owned()),
        char('='),
        map(pvalue, |b| {
            unescape_uri_component(b).unwrap_or_else(|_| String::from_utf8_lossy(b).into_owned())
        }),
    )(input)
}

fn headers(input: &[u8]) -> ParseResult<HashMap<String, String>> {
    let (input, first) = opt(preceded(char('?'), hname_hvalue))(input)?;
    let Some(first) = first else {
        return Ok((input, HashMap::new()));
    };
    let (input, rest) = many0(preceded(char('&'), hname_hvalue))(input)?;
    let mut map = HashMap::new();
    map.insert(first.0, first.1);
    for (k, v) in rest {
        map.insert(k, v);
    }
    Ok((input, map))
}

/// Parses a complete SIP/SIPS/tel URI.
pub fn parse_uri(input: &[u8]) -> ParseResult<Uri> {
    let (input, scheme) = scheme(input)?;
    let (input, _) = char(':')(input)?;

    if scheme == Scheme::Tel {
        let (input, number) = take_while(|c: u8| c != b';' && c != b'?')(input)?;
        let (input, parameters) = uri_parameters(input)?;
        return Ok((
            input,
            Uri {
                scheme,
                user: Some(String::from_utf8_lossy(number).into_owned()),
                password: None,
                host: Host::Domain(String::new()),
                port: None,
                parameters,
                headers: HashMap::new(),
                raw_uri: None,
            },
        ));
    }

    let (input, userinfo_part) = opt(userinfo)(input)?;
    let (input, host) = host(input)?;
    let (input, port) = opt(port)(input)?;
    let (input, parameters) = uri_parameters(input)?;
    let (input, headers) = headers(input)?;

    let (user, password) = match userinfo_part {
        Some((u, p)) => (Some(u), p),
        None => (None, None),
    };

    Ok((
        input,
        Uri {
            scheme,
            user,
            password,
            host,
            port,
            parameters,
            headers,
            raw_uri: None,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::combinator::all_consuming;

    #[test]
    fn parses_simple_sip_uri() {
        let (_, uri) = all_consuming(parse_uri)(b"sip:alice@example.com").unwrap();
        assert_eq!(uri.scheme, Scheme::Sip);
        assert_eq!(uri.user.as_deref(), Some("alice"));
        assert_eq!(uri.host.to_string(), "example.com");
        assert_eq!(uri.port, None);
    }

    #[test]
    fn parses_uri_with_port_and_params() {
        let (_, uri) =
            all_consuming(parse_uri)(b"sip:bob@192.168.1.1:5060;transport=tcp;lr").unwrap();
        assert_eq!(uri.host.to_string(), "192.168.1.1");
        assert_eq!(uri.port, Some(5060));
        assert!(uri.parameters.contains(&Param::Transport("tcp".into())));
        assert!(uri.parameters.contains(&Param::Lr));
    }

    #[test]
    fn parses_sips_uri_with_ipv6_host() {
        let (_, uri) = all_consuming(parse_uri)(b"sips:alice@[2001:db8::1]:5061").unwrap();
        assert_eq!(uri.scheme, Scheme::Sips);
        assert_eq!(uri.port, Some(5061));
        assert!(matches!(uri.host, Host::Address(IpAddr::V6(_))));
    }

    #[test]
    fn parses_uri_with_headers() {
        let (_, uri) =
            all_consuming(parse_uri)(b"sip:alice@example.com?subject=project").unwrap();
        assert_eq!(uri.headers.get("subject").map(String::as_str), Some("project"));
    }
}
