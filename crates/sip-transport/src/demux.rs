//! Inbound demultiplexing: parse a raw datagram, apply RFC 3581 NAT
//! fix-ups to requests, and hand the result to a [`DatagramSink`].

use std::net::SocketAddr;
use std::sync::Arc;

use sip_core::parser::{parse_message_with_mode, ParseMode};
use sip_core::types::message::{Message, Request};
use sip_core::types::transport::{Source, TransportKind};
use sip_core::types::uri::Host;
use tracing::warn;

use crate::transport::DatagramSink;

/// Parses inbound bytes and fixes up the top `Via` of requests before
/// delivering them to a [`DatagramSink`]. Datagram transports are always
/// parsed in [`ParseMode::Lenient`] (a short UDP body is a transport-level
/// truncation, not malformed syntax — RFC 3261 §18.3 / spec.md §4.1).
pub struct Demux<S> {
    transport_kind: TransportKind,
    sink: Arc<S>,
}

impl<S> Demux<S>
where
    S: DatagramSink,
{
    pub fn new(transport_kind: TransportKind, sink: Arc<S>) -> Self {
        Demux { transport_kind, sink }
    }

    pub async fn on_datagram(&self, local: SocketAddr, remote: SocketAddr, bytes: &[u8]) {
        let source = Source::new(local, remote, self.transport_kind);
        match parse_message_with_mode(bytes, ParseMode::Lenient) {
            Ok(Message::Request(mut request)) => {
                apply_nat_fixup(&mut request, remote);
                self.sink.on_datagram(source, Message::Request(request)).await;
            }
            Ok(response @ Message::Response(_)) => {
                self.sink.on_datagram(source, response).await;
            }
            Err(error) => {
                warn!(%remote, %error, "discarding unparseable inbound datagram");
                self.sink.on_parse_error(source, error).await;
            }
        }
    }
}

/// RFC 3261 §18.2.1: if the top Via's sent-by host doesn't match the
/// observed source address, set/overwrite `received`; if the top Via
/// carries `rport` as a bare flag and the observed source port differs
/// from the Via port, set `rport` to the observed port.
fn apply_nat_fixup(request: &mut Request, remote: SocketAddr) {
    let Some(via) = request.headers.0.iter_mut().find_map(|header| match header {
        sip_core::types::headers::TypedHeader::Via(via) => Some(via),
        _ => None,
    }) else {
        return;
    };

    let top_matches_remote = via
        .headers()
        .first()
        .map(|top| matches!(top.host(), Host::Address(ip) if *ip == remote.ip()))
        .unwrap_or(false);
    if !top_matches_remote {
        via.set_received(remote.ip());
    }

    if let Some(None) = via.rport() {
        via.set_rport(Some(remote.port()));
    }
}
