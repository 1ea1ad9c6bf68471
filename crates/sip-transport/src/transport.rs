//! The [`Transport`] abstraction L3 consumes to send bytes, and the
//! inbound callback contract a [`crate::demux::Demux`] delivers datagrams
//! through.

use std::net::SocketAddr;

use async_trait::async_trait;
use bytes::Bytes;
use sip_core::types::message::Message;
use sip_core::types::transport::{Source, TransportKind};

use crate::error::Result;

/// A bound socket capable of sending already-serialized SIP bytes.
///
/// Implementations own the send path only; inbound datagrams are handed to
/// a [`DatagramSink`] by a [`crate::demux::Demux`] wrapping the same socket,
/// so `Transport` itself never parses or dispatches.
#[async_trait]
pub trait Transport: Send + Sync {
    /// The transport protocol this instance speaks.
    fn kind(&self) -> TransportKind;

    /// The local address this transport is bound to.
    fn local_addr(&self) -> SocketAddr;

    /// Sends already-serialized bytes to `destination`.
    async fn send(&self, destination: SocketAddr, bytes: Bytes) -> Result<()>;

    /// Closes the transport; further sends fail with [`crate::error::Error::Closed`].
    async fn close(&self);

    fn is_closed(&self) -> bool;
}

/// Receives fully parsed, NAT-fixed-up inbound messages from a [`crate::demux::Demux`].
///
/// Kept as a trait object rather than a channel so a caller can route
/// synchronously into a transaction registry lookup without an extra hop.
#[async_trait]
pub trait DatagramSink: Send + Sync {
    async fn on_datagram(&self, source: Source, message: Message);

    /// Called when a datagram fails to parse. The default implementation
    /// discards it; RFC 3261 §18 gives no retry semantics for garbage input.
    async fn on_parse_error(&self, _source: Source, _error: sip_core::Error) {}
}
