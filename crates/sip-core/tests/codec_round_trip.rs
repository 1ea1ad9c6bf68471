//! Integration tests covering the parser/serializer pair against RFC 3261
//! examples and the properties in spec.md §8 (P1-P4).

use sip_core::prelude::*;

const INVITE: &[u8] = b"INVITE sip:bob@biloxi.com SIP/2.0\r\n\
Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bKnashds8\r\n\
Max-Forwards: 70\r\n\
To: Bob <sip:bob@biloxi.com>\r\n\
From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n\
CSeq: 314159 INVITE\r\n\
Contact: <sip:alice@pc33.atlanta.com>\r\n\
Content-Type: application/sdp\r\n\
Content-Length: 4\r\n\r\n\
abcd";

#[test]
fn p1_method_survives_parse() {
    let Message::Request(request) = parse_message(INVITE).unwrap() else { panic!("expected request") };
    assert_eq!(request.method, Method::Invite);
}

#[test]
fn p2_round_trip_is_stable_up_to_whitespace_and_injected_headers() {
    let first = parse_message(INVITE).unwrap();
    let Message::Request(request) = &first else { panic!("expected request") };
    let bytes = serialize_request(request, &SerializeContext::udp("pc33.atlanta.com", 5060));
    let second = parse_message(&bytes).unwrap();

    let Message::Request(a) = &first else { unreachable!() };
    let Message::Request(b) = &second else { panic!("expected request") };
    assert_eq!(a.method, b.method);
    assert_eq!(a.uri, b.uri);
    assert_eq!(a.body, b.body);
}

#[test]
fn p3_compact_and_long_form_parse_identically() {
    let long = parse_message(INVITE).unwrap();
    let compact = b"INVITE sip:bob@biloxi.com SIP/2.0\r\n\
v: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bKnashds8\r\n\
Max-Forwards: 70\r\n\
t: Bob <sip:bob@biloxi.com>\r\n\
f: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
i: a84b4c76e66710@pc33.atlanta.com\r\n\
CSeq: 314159 INVITE\r\n\
m: <sip:alice@pc33.atlanta.com>\r\n\
c: application/sdp\r\n\
l: 4\r\n\r\n\
abcd";
    let compact = parse_message(compact).unwrap();
    assert_eq!(long.headers().get(&HeaderName::Via), compact.headers().get(&HeaderName::Via));
    assert_eq!(long.headers().get(&HeaderName::To), compact.headers().get(&HeaderName::To));
}

#[test]
fn p4_line_folded_header_collapses_to_unfolded_form() {
    let folded = b"INVITE sip:bob@biloxi.com SIP/2.0\r\n\
Via: SIP/2.0/UDP pc33.atlanta.com;\r\n branch=z9hG4bKnashds8\r\n\
Max-Forwards: 70\r\n\
To: Bob <sip:bob@biloxi.com>\r\n\
From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n\
CSeq: 314159 INVITE\r\n\
Content-Length: 0\r\n\r\n";
    let message = parse_message(folded).unwrap();
    let Some(TypedHeader::Via(via)) = message.headers().get(&HeaderName::Via) else { panic!("expected Via") };
    assert_eq!(via.branch(), Some("z9hG4bKnashds8"));
}

#[test]
fn missing_mandatory_header_is_rejected() {
    let missing_to = b"INVITE sip:bob@biloxi.com SIP/2.0\r\n\
Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bKnashds8\r\n\
Max-Forwards: 70\r\n\
From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n\
CSeq: 314159 INVITE\r\n\
Content-Length: 0\r\n\r\n";
    assert!(parse_message(missing_to).is_err());
}

#[test]
fn content_length_mismatch_on_datagram_is_tolerated_not_rejected() {
    let short_body = b"INVITE sip:bob@biloxi.com SIP/2.0\r\n\
Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bKnashds8\r\n\
Max-Forwards: 70\r\n\
To: Bob <sip:bob@biloxi.com>\r\n\
From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n\
CSeq: 314159 INVITE\r\n\
Content-Length: 1000\r\n\r\n\
short";
    let message = parse_message(short_body).unwrap();
    assert_eq!(&message.body()[..], b"short");
}

#[test]
fn derives_transaction_and_dialog_ids() {
    let message = parse_message(INVITE).unwrap();
    assert_eq!(transaction_id(message.headers()).as_deref(), Some("z9hG4bKnashds8"));
    let (call_id, from_tag, to_tag) = dialog_id(message.headers()).unwrap();
    assert_eq!(call_id, "a84b4c76e66710@pc33.atlanta.com");
    assert_eq!(from_tag.as_deref(), Some("1928301774"));
    assert_eq!(to_tag, None);
}
