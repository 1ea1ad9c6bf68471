//! UDP transport: a bound socket plus a receive loop that feeds a
//! [`Demux`](crate::demux::Demux).

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use sip_core::types::transport::TransportKind;
use tokio::net::UdpSocket;
use tracing::{debug, trace, warn};

use crate::demux::Demux;
use crate::error::{Error, Result};
use crate::transport::{DatagramSink, Transport};

const MAX_DATAGRAM_SIZE: usize = 65_535;

/// A UDP socket wrapped as a [`Transport`], with its receive loop spawned
/// onto the runtime at [`UdpTransport::bind`] time.
#[derive(Clone)]
pub struct UdpTransport {
    socket: Arc<UdpSocket>,
    local_addr: SocketAddr,
    closed: Arc<AtomicBool>,
    attached: Arc<AtomicBool>,
}

impl UdpTransport {
    /// Binds a UDP socket and spawns its receive loop, delivering parsed,
    /// NAT-fixed-up messages to `sink` via a [`Demux`].
    pub async fn bind<S>(addr: SocketAddr, sink: Arc<S>) -> Result<Self>
    where
        S: DatagramSink + 'static,
    {
        let transport = Self::bind_unattached(addr).await?;
        transport.attach(sink);
        Ok(transport)
    }

    /// Binds a UDP socket without starting its receive loop. Useful when the
    /// eventual sink needs a reference to this transport itself (the usual
    /// case for `sip_dialog_core::SipCore`, which sends *through* the
    /// transport it is also the sink *for* — call [`Self::attach`] once that
    /// sink exists.
    pub async fn bind_unattached(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| Error::Bind { transport: TransportKind::Udp, addr, source })?;
        let local_addr = socket.local_addr().map_err(|source| Error::Bind { transport: TransportKind::Udp, addr, source })?;
        Ok(UdpTransport { socket: Arc::new(socket), local_addr, closed: Arc::new(AtomicBool::new(false)), attached: Arc::new(AtomicBool::new(false)) })
    }

    /// Starts the receive loop, delivering parsed, NAT-fixed-up messages to
    /// `sink` via a [`Demux`]. Only the first call has an effect; a
    /// transport bound with [`Self::bind`] is already attached.
    pub fn attach<S>(&self, sink: Arc<S>)
    where
        S: DatagramSink + 'static,
    {
        if self.attached.swap(true, Ordering::AcqRel) {
            warn!(local_addr = %self.local_addr, "UdpTransport::attach called more than once, ignoring");
            return;
        }
        self.spawn_receive_loop(sink);
    }

    fn spawn_receive_loop<S>(&self, sink: Arc<S>)
    where
        S: DatagramSink + 'static,
    {
        let socket = self.socket.clone();
        let local_addr = self.local_addr;
        let closed = self.closed.clone();
        let demux = Demux::new(TransportKind::Udp, sink);

        tokio::spawn(async move {
            let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
            loop {
                if closed.load(Ordering::Acquire) {
                    break;
                }
                match socket.recv_from(&mut buf).await {
                    Ok((len, remote)) => {
                        trace!(%remote, bytes = len, "received UDP datagram");
                        demux.on_datagram(local_addr, remote, &buf[..len]).await;
                    }
                    Err(error) => {
                        if closed.load(Ordering::Acquire) {
                            break;
                        }
                        warn!(%error, "UDP receive failed");
                    }
                }
            }
            debug!(%local_addr, "UDP receive loop terminated");
        });
    }
}

#[async_trait]
impl Transport for UdpTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Udp
    }

    fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    async fn send(&self, destination: SocketAddr, bytes: Bytes) -> Result<()> {
        if self.is_closed() {
            return Err(Error::Closed);
        }
        self.socket
            .send_to(&bytes, destination)
            .await
            .map_err(|source| Error::Send { destination, source })?;
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for UdpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UdpTransport({})", self.local_addr)
    }
}
