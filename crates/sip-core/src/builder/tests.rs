use super::*;
use crate::types::headers::TypedHeader;
use crate::types::method::Method;
use crate::types::status::StatusCode;

#[test]
fn builds_invite_with_headers_in_construction_order() {
    let request = RequestBuilder::invite("sip:bob@example.com")
        .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
        .to("Bob", "sip:bob@example.com", None)
        .call_id("a84b4c76e66710@pc33.atlanta.com")
        .cseq(314159)
        .max_forwards(70)
        .contact("sip:alice@pc33.atlanta.com")
        .build();

    assert_eq!(request.method, Method::Invite);
    assert!(matches!(request.header(&crate::types::headers::HeaderName::From), Some(TypedHeader::From(_))));
    let Some(TypedHeader::CSeq(cseq)) = request.header(&crate::types::headers::HeaderName::CSeq) else {
        panic!("expected CSeq header")
    };
    assert_eq!(cseq.number, 314159);
    assert_eq!(cseq.method, Method::Invite);
}

#[test]
fn builds_ok_response_with_to_tag() {
    let response = ResponseBuilder::ok()
        .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
        .to("Bob", "sip:bob@example.com", Some("a6c85cf"))
        .call_id("a84b4c76e66710@pc33.atlanta.com")
        .cseq(314159, Method::Invite)
        .build();

    assert_eq!(response.status_code, StatusCode::Ok);
    let Some(TypedHeader::To(to)) = response.header(&crate::types::headers::HeaderName::To) else {
        panic!("expected To header")
    };
    assert_eq!(to.tag(), Some("a6c85cf"));
}

#[test]
fn cseq_method_defaults_to_the_request_method() {
    let request = RequestBuilder::bye("sip:bob@example.com").cseq(2).build();
    let Some(TypedHeader::CSeq(cseq)) = request.header(&crate::types::headers::HeaderName::CSeq) else {
        panic!("expected CSeq header")
    };
    assert_eq!(cseq.method, Method::Bye);
}
