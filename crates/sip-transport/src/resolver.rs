//! Hostname-to-address resolution for outbound sends.
//!
//! RFC 3263 describes a full NAPTR/SRV/A resolution chain; that chain is
//! explicitly out of scope here (see `SystemResolver`'s docs). Callers that
//! need the full chain implement [`Resolver`] themselves.

use std::net::{IpAddr, SocketAddr};

use async_trait::async_trait;
use sip_core::types::transport::TransportKind;
use tokio::net::lookup_host;

use crate::error::{Error, Result};

/// Resolves a SIP URI host to a concrete address to send to.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, host: &str, transport: TransportKind) -> Result<(IpAddr, u16)>;
}

/// A single DNS A/AAAA lookup via the host resolver, defaulting the port to
/// the transport's RFC 3263 §4.1 default when the host string carries none.
///
/// This is deliberately just that one lookup, not an SRV/NAPTR resolution
/// chain: multiple target candidates with failover belong to a higher layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, host: &str, transport: TransportKind) -> Result<(IpAddr, u16)> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok((ip, transport.default_port()));
        }

        let lookup_target = format!("{}:{}", host, transport.default_port());
        let mut addrs = lookup_host(&lookup_target)
            .await
            .map_err(|source| Error::Resolve { host: host.to_string(), source })?;

        let addr: SocketAddr = addrs
            .next()
            .ok_or_else(|| Error::NoAddresses { host: host.to_string() })?;
        Ok((addr.ip(), addr.port()))
    }
}
