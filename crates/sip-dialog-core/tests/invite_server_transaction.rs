//! Exercises the INVITE server transaction FSM (spec.md §4.3.3) against a
//! [`MockTransport`](common::MockTransport): the UAS happy path and the
//! CANCEL race from spec.md §8 scenarios 1 and 3.

mod common;

use std::sync::Arc;
use std::time::Duration;

use sip_core::builder::{RequestBuilder, ResponseBuilder};
use sip_core::types::headers::HeaderName;
use sip_core::types::method::Method;
use sip_core::types::param::Param;
use sip_core::types::status::StatusCode;
use sip_core::types::transport::{Source, TransportKind};
use sip_core::types::via::Via;
use sip_dialog_core::transaction::{server::invite, ServerTransaction, Transaction};

use common::{MockTransport, RecordingHandler};

fn sample_invite(branch: &str) -> sip_core::types::message::Request {
    RequestBuilder::invite("sip:bob@biloxi.com")
        .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
        .to("Bob", "sip:bob@biloxi.com", None)
        .call_id("a84b4c76e66710@pc33.atlanta.com")
        .cseq(314159)
        .via(Via::new("SIP", "2.0", "UDP", "pc33.atlanta.com", Some(5060), vec![Param::branch(branch)]).unwrap())
        .build()
}

fn uas_final_response(request: &sip_core::types::message::Request, status: StatusCode, to_tag: &str) -> sip_core::types::message::Response {
    let via = match request.headers.get(&HeaderName::Via) {
        Some(sip_core::types::headers::TypedHeader::Via(via)) => via.clone(),
        _ => unreachable!(),
    };
    ResponseBuilder::new(status, None)
        .via(via)
        .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
        .to("Bob", "sip:bob@biloxi.com", Some(to_tag))
        .call_id("a84b4c76e66710@pc33.atlanta.com")
        .cseq(314159, Method::Invite)
        .build()
}

#[tokio::test]
async fn uas_happy_path_emits_trying_then_application_finals() {
    let transport = Arc::new(MockTransport::new("127.0.0.1:15062", TransportKind::Udp));
    let peer: std::net::SocketAddr = "192.0.2.4:5060".parse().unwrap();
    let source = Source::new("127.0.0.1:15062".parse().unwrap(), peer, TransportKind::Udp);

    let request = sample_invite("z9hG4bKuas1");
    let ok = uas_final_response(&request, StatusCode::Ok, "uastag1");
    let handler = Arc::new(RecordingHandler::new());
    handler.reply_with(ok);

    let handle = invite::spawn(request, source, transport.clone(), common::fast_timers(), handler.clone());

    // Both the immediate 100 Trying and the application's 200 OK land
    // before this; order matters (Trying first), count doesn't depend on
    // exactly when each send is observed.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let sent = transport.drain();
    assert_eq!(sent.len(), 2, "a 100 Trying followed by the application's 200 OK");
    assert!(String::from_utf8_lossy(&sent[0].1).starts_with("SIP/2.0 100 Trying"));
    assert!(String::from_utf8_lossy(&sent[1].1).starts_with("SIP/2.0 200 OK"));

    // A 2xx moves straight to `terminated` (no Timer H/I wait), per spec.md §4.3.3.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(handle.is_terminated());
}

#[tokio::test]
async fn cancel_during_proceeding_yields_487_and_completes() {
    let transport = Arc::new(MockTransport::new("127.0.0.1:15063", TransportKind::Udp));
    let peer: std::net::SocketAddr = "192.0.2.4:5060".parse().unwrap();
    let source = Source::new("127.0.0.1:15063".parse().unwrap(), peer, TransportKind::Udp);

    let request = sample_invite("z9hG4bKuas2");
    let handler = Arc::new(RecordingHandler::new());
    // No scripted reply: leave the transaction in `proceeding` until the CANCEL arrives.

    let handle = invite::spawn(request, source, transport.clone(), common::fast_timers(), handler.clone());

    transport.wait_for_send(Duration::from_millis(200)).await;
    transport.drain(); // 100 Trying

    handle.on_cancel().await;
    transport.wait_for_send(Duration::from_millis(200)).await;

    let sent = transport.drain();
    assert_eq!(sent.len(), 1, "CANCEL during proceeding produces exactly one automatic 487");
    let text = String::from_utf8_lossy(&sent[0].1);
    assert!(text.starts_with("SIP/2.0 487 Request Terminated"));

    // The transaction now sits in `completed`, waiting on the peer's ACK
    // (Timer H), not already gone.
    assert!(!handle.is_terminated());
}
