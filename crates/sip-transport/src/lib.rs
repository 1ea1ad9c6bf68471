//! Transport-layer plumbing for a SIP signaling stack.
//!
//! A [`Transport`] sends already-serialized bytes; a [`demux::Demux`] sits
//! in front of it on the receive side, parsing inbound datagrams and
//! applying the RFC 3261 §18.2.1 / RFC 3581 NAT fix-ups before handing the
//! message to whatever [`DatagramSink`] the caller supplied (typically a
//! transaction registry lookup in `sip-dialog-core`). [`Resolver`] covers
//! the single DNS lookup outbound sends need to turn a host into an
//! address; it is not an RFC 3263 SRV/NAPTR resolution chain.

pub mod demux;
pub mod error;
pub mod resolver;
pub mod transport;
pub mod udp;

pub use demux::Demux;
pub use error::{Error, Result};
pub use resolver::{Resolver, SystemResolver};
pub use transport::{DatagramSink, Transport};
pub use udp::UdpTransport;

pub mod prelude {
    pub use crate::{DatagramSink, Demux, Error, Resolver, Result, SystemResolver, Transport, UdpTransport};
}
