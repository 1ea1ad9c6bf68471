//! Exercises the non-INVITE client and server transaction FSMs
//! (RFC 3261 §17.1.2 / §17.2.2, spec.md §4.3.2 / §4.3.4).

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
use sip_dialog_core::transaction::{client::non_invite as client_non_invite, server::non_invite as server_non_invite};
use sip_dialog_core::transaction::{ClientTransaction, ServerTransaction, Transaction};

use common::{MockTransport, RecordingHandler};

fn sample_register(branch: &str) -> sip_core::types::message::Request {
    RequestBuilder::register("sip:registrar.atlanta.com")
        .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
        .to("Alice", "sip:alice@atlanta.com", None)
        .call_id("reg1@pc33.atlanta.com")
        .cseq(1)
        .via(Via::new("SIP", "2.0", "UDP", "pc33.atlanta.com", Some(5060), vec![Param::branch(branch)]).unwrap())
        .build()
}

#[tokio::test]
async fn client_retransmits_until_final_response_then_stops() {
    let transport = Arc::new(MockTransport::new("127.0.0.1:15070", TransportKind::Udp));
    let handler = Arc::new(RecordingHandler::new());
    let destination: std::net::SocketAddr = "192.0.2.5:5060".parse().unwrap();

    let request = sample_register("z9hG4bKreg1");
    let handle =
        client_non_invite::spawn(request.clone(), transport.clone(), destination, common::fast_timers(), handler.clone());

    transport.wait_for_send(Duration::from_millis(100)).await;
    transport.drain(); // initial send

    // Timer E retransmits at T1 while no response has arrived.
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(transport.sent_count() >= 1, "Timer E should have fired at least once by now");
    transport.drain();

    let ok = ResponseBuilder::new(StatusCode::Ok, None)
        .via(match request.headers.get(&HeaderName::Via) {
            Some(sip_core::types::headers::TypedHeader::Via(via)) => via.clone(),
            _ => unreachable!(),
        })
        .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
        .to("Alice", "sip:alice@atlanta.com", Some("regtag"))
        .call_id("reg1@pc33.atlanta.com")
        .cseq(1, Method::Register)
        .build();
    let source = Source::new("127.0.0.1:15070".parse().unwrap(), destination, TransportKind::Udp);
    handle.on_response(ok, source).await;

    // Once `completed`, retransmissions from Timer E stop entirely.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(transport.sent_count(), 0, "no further sends once a final response lands");

    let results = handler.results.lock().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].1, "success");
}

#[tokio::test]
async fn server_does_not_auto_emit_provisional_and_retransmits_final_on_duplicate_request() {
    let transport = Arc::new(MockTransport::new("127.0.0.1:15071", TransportKind::Udp));
    let peer: std::net::SocketAddr = "192.0.2.5:5060".parse().unwrap();
    let source = Source::new("127.0.0.1:15071".parse().unwrap(), peer, TransportKind::Udp);

    let request = sample_register("z9hG4bKreg2");
    let ok = ResponseBuilder::new(StatusCode::Ok, None)
        .via(match request.headers.get(&HeaderName::Via) {
            Some(sip_core::types::headers::TypedHeader::Via(via)) => via.clone(),
            _ => unreachable!(),
        })
        .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
        .to("Alice", "sip:alice@atlanta.com", Some("regtag"))
        .call_id("reg1@pc33.atlanta.com")
        .cseq(1, Method::Register)
        .build();
    let handler = Arc::new(RecordingHandler::new());
    handler.reply_with(ok);

    let handle = server_non_invite::spawn(request.clone(), source.clone(), transport.clone(), common::fast_timers(), handler.clone());

    transport.wait_for_send(Duration::from_millis(100)).await;
    let sent = transport.drain();
    // No automatic 100 Trying for non-INVITE (spec.md §4.3.4): only the
    // application's 200 OK goes out.
    assert_eq!(sent.len(), 1);
    assert!(String::from_utf8_lossy(&sent[0].1).starts_with("SIP/2.0 200 OK"));

    // A retransmitted request (same branch) replays the cached final response.
    handle.on_request(request, source).await;
    transport.wait_for_send(Duration::from_millis(100)).await;
    let replay = transport.drain();
    assert_eq!(replay.len(), 1);
    assert_eq!(replay[0].1, sent[0].1);

    assert!(!handle.is_terminated(), "still waiting out Timer J after the 200 OK");
}
