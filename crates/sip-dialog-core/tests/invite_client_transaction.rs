//! Exercises the INVITE client transaction FSM (spec.md §4.3.1) against a
//! [`MockTransport`](common::MockTransport) instead of a real socket,
//! covering the timeout and auto-ACK scenarios from spec.md §8.

mod common;

use std::sync::Arc;
use std::time::Duration;

use sip_core::builder::RequestBuilder;
use sip_core::types::method::Method;
use sip_core::types::param::Param;
use sip_core::types::status::StatusCode;
use sip_core::types::transport::{Source, TransportKind};
use sip_core::types::via::Via;
use sip_dialog_core::transaction::client::invite;
use sip_dialog_core::transaction::{ClientTransaction, Transaction};

use common::{fast_timers, MockTransport, RecordingHandler};

fn sample_invite(branch: &str) -> sip_core::types::message::Request {
    RequestBuilder::invite("sip:bob@biloxi.com")
        .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
        .to("Bob", "sip:bob@biloxi.com", None)
        .call_id("a84b4c76e66710@pc33.atlanta.com")
        .cseq(314159)
        .via(Via::new("SIP", "2.0", "UDP", "pc33.atlanta.com", Some(5060), vec![Param::branch(branch)]).unwrap())
        .build()
}

#[tokio::test]
async fn timer_a_retransmits_and_timer_b_times_out() {
    let transport = Arc::new(MockTransport::new("127.0.0.1:15060", TransportKind::Udp));
    transport.discard_sends();
    let handler = Arc::new(RecordingHandler::new());
    let destination: std::net::SocketAddr = "192.0.2.4:5060".parse().unwrap();

    let handle = invite::spawn(sample_invite("z9hG4bKnashds8"), transport.clone(), destination, fast_timers(), handler.clone());

    // Timer B = 64 * t1 = 64 * 20ms = 1280ms with fast_timers(); give it
    // headroom and confirm exactly one terminal event is delivered.
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert!(handle.is_terminated());
    let results = handler.results.lock().unwrap();
    assert_eq!(results.len(), 1, "exactly one terminal event per spec.md §7");
    assert_eq!(results[0].1, "timeout");
}

#[tokio::test]
async fn non_2xx_final_response_triggers_automatic_ack() {
    let transport = Arc::new(MockTransport::new("127.0.0.1:15061", TransportKind::Udp));
    let handler = Arc::new(RecordingHandler::new());
    let destination: std::net::SocketAddr = "192.0.2.4:5060".parse().unwrap();

    let request = sample_invite("z9hG4bKnashds8");
    let handle = invite::spawn(request.clone(), transport.clone(), destination, fast_timers(), handler.clone());

    transport.wait_for_send(Duration::from_millis(200)).await; // initial INVITE send
    transport.drain();

    let moved: Source = Source::new(
        "127.0.0.1:15061".parse().unwrap(),
        destination,
        TransportKind::Udp,
    );
    let response = sip_core::builder::ResponseBuilder::new(StatusCode::MovedTemporarily, None)
        .via(match request.headers.get(&sip_core::types::headers::HeaderName::Via) {
            Some(sip_core::types::headers::TypedHeader::Via(via)) => via.clone(),
            _ => unreachable!(),
        })
        .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
        .to("Bob", "sip:bob@biloxi.com", Some("a6c85cf"))
        .call_id("a84b4c76e66710@pc33.atlanta.com")
        .cseq(314159, Method::Invite)
        .build();

    handle.on_response(response, moved).await;
    transport.wait_for_send(Duration::from_millis(200)).await;

    let sent = transport.drain();
    assert_eq!(sent.len(), 1, "exactly one ACK for the 3xx");
    let ack_text = String::from_utf8_lossy(&sent[0].1);
    assert!(ack_text.starts_with("ACK sip:bob@biloxi.com SIP/2.0"));
    assert!(ack_text.contains("branch=z9hG4bKnashds8"));
    assert!(ack_text.contains("CSeq: 314159 ACK"));

    // A retransmitted 3xx re-emits the identical ACK bytes (spec.md §4.3.1).
    let retransmit: Source = Source::new("127.0.0.1:15061".parse().unwrap(), destination, TransportKind::Udp);
    let retransmitted_response = sip_core::builder::ResponseBuilder::new(StatusCode::MovedTemporarily, None)
        .via(match request.headers.get(&sip_core::types::headers::HeaderName::Via) {
            Some(sip_core::types::headers::TypedHeader::Via(via)) => via.clone(),
            _ => unreachable!(),
        })
        .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
        .to("Bob", "sip:bob@biloxi.com", Some("a6c85cf"))
        .call_id("a84b4c76e66710@pc33.atlanta.com")
        .cseq(314159, Method::Invite)
        .build();
    handle.on_response(retransmitted_response, retransmit).await;
    transport.wait_for_send(Duration::from_millis(200)).await;
    let sent_again = transport.drain();
    assert_eq!(sent_again.len(), 1);
    assert_eq!(sent_again[0].1, sent[0].1, "retransmitted 3xx re-emits byte-identical ACK");
}
