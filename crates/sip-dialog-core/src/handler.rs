//! The application-supplied callback tables (spec.md §6.4): a `UasHandler`
//! for inbound server transactions and a `UacHandler` for outbound client
//! transactions. Both are async traits so an application can await its own
//! I/O (database lookups, media negotiation) from inside a callback without
//! blocking the transaction actor that invoked it.

use async_trait::async_trait;
use bytes::Bytes;
use sip_core::types::message::{Request, Response};

use crate::dialog::DialogId;
use crate::error::TransactionError;
use crate::transaction::TransactionId;

/// What a `UasHandler::on_request` call asks the server transaction to do.
#[derive(Debug, Clone)]
pub enum UasAction {
    /// Continue ordinary UAS processing; the application will supply
    /// response(s) itself via the transaction handle it was given.
    Process,
    /// Short-circuit: send `response` immediately and let the transaction
    /// run its normal post-response timer sequence.
    Reply(Response),
    /// The application has taken ownership of the transaction and will
    /// drive it (send responses) out of band; no default action follows.
    NoReply,
}

/// What a `UacHandler` callback asks the client transaction to do next.
#[derive(Debug, Clone)]
pub enum UacAction {
    Ok,
    /// Send an ACK for the 2xx just delivered, with the given extra headers
    /// and body (the ACK for a 2xx is end-to-end, not transaction-owned —
    /// spec.md §4.3.1).
    SendAck { extra_headers: Vec<sip_core::types::headers::TypedHeader>, body: Bytes },
    Stop { reason: String },
    FollowRedirect,
}

/// The outcome a client transaction reports exactly once to its owner
/// (spec.md §7, "exactly one terminal event").
#[derive(Debug, Clone)]
pub enum TransactionResult {
    Success(Response),
    FinalNonSuccess(Response),
    Timeout,
    Error(String),
}

#[async_trait]
pub trait UasHandler: Send + Sync {
    /// A new server transaction was created for an inbound request.
    async fn on_request(&self, tx: TransactionId, request: &Request) -> UasAction {
        let _ = (tx, request);
        UasAction::Process
    }

    /// A 2xx-ACK matched no INVITE server transaction (late or stray).
    async fn on_ack(&self, request: &Request) {
        let _ = request;
    }

    /// A CANCEL matched an INVITE server transaction.
    async fn on_cancel(&self, tx: TransactionId) {
        let _ = tx;
    }

    /// A client transaction driven on this application's behalf terminated.
    async fn on_transaction_result(&self, tx: TransactionId, result: TransactionResult) {
        let _ = (tx, result);
    }
}

#[async_trait]
pub trait UacHandler: Send + Sync {
    async fn on_provisional(&self, response: &Response) -> UacAction {
        let _ = response;
        UacAction::Ok
    }

    async fn on_success(&self, response: &Response) -> UacAction {
        let _ = response;
        UacAction::Ok
    }

    async fn on_redirect(&self, response: &Response) -> UacAction {
        let _ = response;
        UacAction::Ok
    }

    async fn on_client_error(&self, response: &Response) -> UacAction {
        let _ = response;
        UacAction::Ok
    }

    async fn on_server_error(&self, response: &Response) -> UacAction {
        let _ = response;
        UacAction::Ok
    }

    async fn on_global_failure(&self, response: &Response) -> UacAction {
        let _ = response;
        UacAction::Ok
    }

    async fn on_error(&self, error: TransactionError) {
        let _ = error;
    }

    async fn on_call_established(&self, dialog_id: DialogId) {
        let _ = dialog_id;
    }

    async fn on_info(&self, message: &Response) {
        let _ = message;
    }

    /// The client transaction this handler was supplied to has reached its
    /// one terminal event (spec.md §7: "exactly one terminal event" per
    /// owner). spec.md §6.4 lists `on_transaction_result` under the UAS
    /// handler table, but the owner of a client transaction is always
    /// whoever supplied its `UacHandler` — this core settles that ambiguity
    /// by delivering the terminal event here instead (see DESIGN.md).
    async fn on_transaction_result(&self, tx: TransactionId, result: TransactionResult) {
        let _ = (tx, result);
    }
}
