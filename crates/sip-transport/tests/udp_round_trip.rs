//! Exercises a real loopback UDP socket pair: send, receive, and the NAT
//! `received`/`rport` fix-up from spec.md §8 scenario 6.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sip_core::prelude::*;
use sip_transport::{DatagramSink, Transport, UdpTransport};
use tokio::sync::Notify;

struct CollectingSink {
    received: Mutex<Vec<(Source, Message)>>,
    notify: Notify,
}

impl CollectingSink {
    fn new() -> Arc<Self> {
        Arc::new(CollectingSink { received: Mutex::new(Vec::new()), notify: Notify::new() })
    }
}

#[async_trait]
impl DatagramSink for CollectingSink {
    async fn on_datagram(&self, source: Source, message: Message) {
        self.received.lock().unwrap().push((source, message));
        self.notify.notify_one();
    }
}

async fn wait_for_one(sink: &CollectingSink) -> (Source, Message) {
    tokio::time::timeout(Duration::from_secs(2), sink.notify.notified()).await.expect("timed out waiting for datagram");
    sink.received.lock().unwrap().pop().expect("sink notified with no message")
}

#[tokio::test]
async fn delivers_request_and_applies_nat_fixup() {
    let server_sink = CollectingSink::new();
    let server = UdpTransport::bind("127.0.0.1:0".parse().unwrap(), server_sink.clone()).await.unwrap();
    let server_addr = server.local_addr();

    let client_sink = CollectingSink::new();
    let client = UdpTransport::bind("127.0.0.1:0".parse().unwrap(), client_sink).await.unwrap();
    let client_addr = client.local_addr();

    let request = RequestBuilder::register("sip:example.com")
        .from("alice", "sip:alice@example.com", Some("tag1"))
        .to("alice", "sip:alice@example.com", None)
        .call_id("call1@example.com")
        .cseq(1)
        .via(Via::new("SIP", "2.0", "UDP", "client.atlanta.com", Some(5060), vec![Param::Rport(None)]).unwrap())
        .build();
    let bytes = serialize_request(&request, &SerializeContext::udp("client.atlanta.com", 5060));

    client.send(server_addr, bytes).await.unwrap();

    let (source, message) = wait_for_one(&server_sink).await;
    assert_eq!(source.remote, client_addr);

    let Message::Request(received) = message else { panic!("expected request") };
    let Some(TypedHeader::Via(via)) = received.headers.get(&HeaderName::Via) else { panic!("expected Via") };
    assert_eq!(via.received(), Some(client_addr.ip()));
    assert_eq!(via.rport(), Some(Some(client_addr.port())));
}
