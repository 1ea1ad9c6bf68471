//! Shared transaction types: the key every transaction is addressed by, and
//! the trait objects the registry stores so it can route inbound messages
//! without knowing which of the four FSM kinds it is forwarding to.
//!
//! Grounded in the reference crate's split of per-kind runners behind a
//! common set of thin traits (there: `AsRefKey`/`HasCommandSender`/
//! `HasTransactionEvents`/`HasTransport`) rather than one monomorphic actor.

pub mod client;
pub mod server;

use std::fmt;

use async_trait::async_trait;
use sip_core::types::message::{Request, Response};
use sip_core::types::method::Method;
use sip_core::types::transport::Source;

/// The side of a transaction a given key addresses (RFC 3261 §17.1.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    Server,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Client => "client",
            Role::Server => "server",
        })
    }
}

/// Which of the four FSMs a transaction runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    InviteClient,
    NonInviteClient,
    InviteServer,
    NonInviteServer,
}

/// `(branch, cseq_method, role)` — RFC 3261 §17.1.3's transaction identity.
///
/// CANCEL is looked up by substituting `Method::Invite` for its own method:
/// a CANCEL's branch identifies the INVITE server transaction it targets,
/// not a transaction of its own (the CANCEL itself runs as an ordinary
/// non-INVITE server transaction under its own key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionKey {
    pub branch: String,
    pub method: Method,
    pub role: Role,
}

/// Addresses a transaction in application-facing callbacks (spec.md §6.4).
pub type TransactionId = TransactionKey;

impl TransactionKey {
    pub fn new(branch: impl Into<String>, method: Method, role: Role) -> Self {
        TransactionKey { branch: branch.into(), method, role }
    }

    /// The key of the INVITE server transaction a CANCEL with this branch targets.
    pub fn cancel_target(branch: impl Into<String>) -> Self {
        TransactionKey { branch: branch.into(), method: Method::Invite, role: Role::Server }
    }
}

impl fmt::Display for TransactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.branch, self.method, self.role)
    }
}

/// Behavior common to every transaction, regardless of kind.
pub trait Transaction: Send + Sync {
    fn key(&self) -> &TransactionKey;
    fn is_terminated(&self) -> bool;

    /// When this transaction was spawned (spec.md §3's `created_at`).
    fn created_at(&self) -> std::time::Instant;
}

/// A client transaction accepts responses from the transport layer.
#[async_trait]
pub trait ClientTransaction: Transaction {
    async fn on_response(&self, response: Response, source: Source);
    async fn cancel(&self);
}

/// A server transaction accepts retransmitted requests and, for INVITE, ACKs.
#[async_trait]
pub trait ServerTransaction: Transaction {
    async fn on_request(&self, request: Request, source: Source);
    async fn on_ack(&self, request: Request, source: Source);

    /// A CANCEL matched this transaction's branch (spec.md §4.3.6). Only
    /// INVITE server transactions act on this; non-INVITE ignores it since
    /// RFC 3261 §9.1 restricts CANCEL to INVITE targets.
    async fn on_cancel(&self) {}
}
