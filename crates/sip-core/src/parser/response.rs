//! Parser for the response start line (RFC 3261 Section 7.2):
//! `Status-Line = SIP-Version SP Status-Code SP Reason-Phrase CRLF`.

use std::str;

use nom::{
    bytes::complete::{tag_no_case, take_till, take_while1},
    character::complete::{char, space1},
    combinator::map_res,
    sequence::{terminated, tuple},
};

use crate::error::{Error, Result};
use crate::parser::whitespace::crlf;
use crate::parser::ParseResult;
use crate::types::message::Version;
use crate::types::StatusCode;

pub fn sip_version(input: &[u8]) -> ParseResult<Version> {
    let (input, _) = tag_no_case("SIP")(input)?;
    let (input, _) = char('/')(input)?;
    let (input, major) = map_res(take_while1(|c: u8| c.is_ascii_digit()), |b: &[u8]| {
        str::from_utf8(b).unwrap_or("0").parse::<u8>()
    })(input)?;
    let (input, _) = char('.')(input)?;
    let (input, minor) = map_res(take_while1(|c: u8| c.is_ascii_digit()), |b: &[u8]| {
        str::from_utf8(b).unwrap_or("0").parse::<u8>()
    })(input)?;
    Ok((input, Version { major, minor }))
}

pub fn status_code(input: &[u8]) -> ParseResult<StatusCode> {
    map_res(take_while1(|c: u8| c.is_ascii_digit()), |code_bytes: &[u8]| -> Result<StatusCode> {
        if code_bytes.len() != 3 {
            return Err(Error::ParseError("status code must be 3 digits".to_string()));
        }
        let code = str::from_utf8(code_bytes)?.parse::<u16>().map_err(|e| Error::ParseError(e.to_string()))?;
        StatusCode::from_u16(code)
    })(input)
}

pub fn reason_phrase(input: &[u8]) -> ParseResult<&[u8]> {
    take_till(|c| c == b'\r' || c == b'\n')(input)
}

pub fn parse_status_line(input: &[u8]) -> ParseResult<(Version, StatusCode, String)> {
    let (input, (version, _, status, _, reason)) = tuple((
        sip_version,
        space1,
        status_code,
        space1,
        terminated(reason_phrase, crlf),
    ))(input)?;
    Ok((input, (version, status, String::from_utf8_lossy(reason).into_owned())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_line() {
        let (rem, (version, status, reason)) = parse_status_line(b"SIP/2.0 200 OK\r\n").unwrap();
        assert!(rem.is_empty());
        assert_eq!(version, Version::SIP_2_0);
        assert_eq!(status, StatusCode::Ok);
        assert_eq!(reason, "OK");
    }

    #[test]
    fn parses_status_line_with_empty_reason() {
        let (_, (_, status, reason)) = parse_status_line(b"SIP/2.0 501 \r\n").unwrap();
        assert_eq!(status, StatusCode::NotImplemented);
        assert_eq!(reason, "");
    }

    #[test]
    fn rejects_non_sip_version() {
        assert!(parse_status_line(b"HTTP/1.1 200 OK\r\n").is_err());
    }

    #[test]
    fn rejects_wrong_digit_count() {
        assert!(parse_status_line(b"SIP/2.0 20 OK\r\n").is_err());
        assert!(parse_status_line(b"SIP/2.0 2000 OK\r\n").is_err());
    }
}
