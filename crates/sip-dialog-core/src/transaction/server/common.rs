//! Shared response-construction helpers for both server transaction FSMs:
//! copying the correlating headers (`Via`, `From`, `To`, `Call-ID`, `CSeq`)
//! from a request onto an automatic response (100 Trying, 487, 481, ...).

use sip_core::builder::ResponseBuilder;
use sip_core::types::headers::{HeaderName, TypedHeader};
use sip_core::types::message::{Request, Response};
use sip_core::types::status::StatusCode;

/// A short random To-tag for the automatic final responses this layer
/// generates on the application's behalf (e.g. the `487` a CANCEL race
/// produces, spec.md §4.3.6), when the request's `To` doesn't already
/// carry one.
pub fn generate_tag() -> String {
    let mut tag = String::with_capacity(8);
    for _ in 0..8 {
        let n = fastrand::u8(0..16);
        tag.push(char::from_digit(u32::from(n), 16).unwrap());
    }
    tag
}

/// Builds a response to `request` carrying every `Via` line unchanged, the
/// request's `From`, a `To` with `to_tag` applied if one is given and the
/// header doesn't already carry one, the request's `Call-ID`, and a `CSeq`
/// matching the request's number and method.
pub fn build_response(request: &Request, status: StatusCode, to_tag: Option<&str>) -> Response {
    let mut builder = ResponseBuilder::new(status, None);

    for via in request.headers.get_all(&HeaderName::Via) {
        builder = builder.header(via.clone());
    }
    if let Some(from) = request.headers.get(&HeaderName::From) {
        builder = builder.header(from.clone());
    }
    if let Some(TypedHeader::To(to)) = request.headers.get(&HeaderName::To) {
        let mut to = to.clone();
        if to.tag().is_none() {
            if let Some(tag) = to_tag {
                to.set_tag(tag);
            }
        }
        builder = builder.header(TypedHeader::To(to));
    }
    if let Some(call_id) = request.headers.get(&HeaderName::CallId) {
        builder = builder.header(call_id.clone());
    }
    if let Some(cseq) = request.headers.get(&HeaderName::CSeq) {
        builder = builder.header(cseq.clone());
    }
    builder.build()
}
