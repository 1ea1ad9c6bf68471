//! Error types for the transport layer.

use std::net::SocketAddr;

/// Errors raised while binding, sending on, or demultiplexing a transport.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to bind {transport} socket on {addr}: {source}")]
    Bind { transport: sip_core::types::transport::TransportKind, addr: SocketAddr, #[source] source: std::io::Error },

    #[error("send to {destination} failed: {source}")]
    Send { destination: SocketAddr, #[source] source: std::io::Error },

    #[error("transport is closed")]
    Closed,

    #[error("failed to resolve {host}: {source}")]
    Resolve { host: String, #[source] source: std::io::Error },

    #[error("{host} resolved to no addresses")]
    NoAddresses { host: String },

    #[error("malformed SIP datagram from {from}: {error}")]
    Malformed { from: SocketAddr, #[source] error: sip_core::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
