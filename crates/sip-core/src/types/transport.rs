//! The transport kinds a SIP message can ride over, and the socket-level
//! provenance ([`Source`]) attached to a message on ingress.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A SIP transport protocol (RFC 3261 §18, RFC 3581, RFC 3263 §4.1 default ports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportKind {
    Udp,
    Tcp,
    Tls,
    Ws,
    Wss,
}

impl TransportKind {
    /// The default port RFC 3263 §4.1 assigns this transport when a URI omits one.
    pub fn default_port(self) -> u16 {
        match self {
            TransportKind::Udp | TransportKind::Tcp => 5060,
            TransportKind::Tls => 5061,
            TransportKind::Ws => 80,
            TransportKind::Wss => 443,
        }
    }

    /// True for transports with message boundaries preserved by the underlying
    /// socket (datagram-oriented), as opposed to a byte stream needing
    /// `Content-Length`-driven framing.
    pub fn is_datagram(self) -> bool {
        matches!(self, TransportKind::Udp)
    }

    /// True for transports that run over TLS.
    pub fn is_secure(self) -> bool {
        matches!(self, TransportKind::Tls | TransportKind::Wss)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportKind::Udp => "UDP",
            TransportKind::Tcp => "TCP",
            TransportKind::Tls => "TLS",
            TransportKind::Ws => "WS",
            TransportKind::Wss => "WSS",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "UDP" => TransportKind::Udp,
            "TCP" => TransportKind::Tcp,
            "TLS" => TransportKind::Tls,
            "WS" => TransportKind::Ws,
            "WSS" => TransportKind::Wss,
            _ => return Err(Error::Transport(format!("unknown transport: {}", s))),
        })
    }
}

/// Where a message came from and went to at the socket level, attached to a
/// [`crate::types::message::Request`]/[`crate::types::message::Response`] on ingress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub local: SocketAddr,
    pub remote: SocketAddr,
    pub transport: TransportKind,
}

impl Source {
    pub fn new(local: SocketAddr, remote: SocketAddr, transport: TransportKind) -> Self {
        Source { local, remote, transport }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}->{}", self.transport, self.remote, self.local)
    }
}
