//! The "glue" named in spec.md's system-overview table: a [`SipCore`] that
//! owns the transaction/dialog registries and wires inbound datagrams
//! (via [`sip_transport::DatagramSink`]) to the right transaction, per
//! spec.md §4.2's demultiplexing steps, and turns outbound application
//! requests into a freshly spawned client transaction.
//!
//! Everything in `transaction`/`dialog` works as a standalone FSM driven
//! directly in tests; `SipCore` is what makes a real inbound datagram find
//! its way to one without the application having to do branch arithmetic
//! itself.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use sip_core::parser::transaction_id;
use sip_core::types::headers::{HeaderName, TypedHeader};
use sip_core::types::message::{Message, Request, Response};
use sip_core::types::method::Method;
use sip_core::types::status::StatusCode;
use sip_core::types::transport::Source;
use sip_transport::{DatagramSink, Resolver, Transport};
use tracing::{debug, warn};

use crate::handler::{TransactionId, UasAction, UasHandler, UacHandler};
use crate::registry::{DialogRegistry, TransactionRegistry};
use crate::timer::TimerProfile;
use crate::transaction::client::{invite as invite_client, non_invite as non_invite_client};
use crate::transaction::server::{common::build_response, invite as invite_server, non_invite as non_invite_server};
use crate::transaction::{Role, ServerTransaction, Transaction, TransactionKey};

/// Errors raised attempting to start an outbound client transaction.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("request has no Request-URI host to route to")]
    NoDestination,

    #[error(transparent)]
    Resolve(#[from] sip_transport::Error),

    #[error(transparent)]
    Transaction(#[from] crate::error::TransactionError),
}

/// A handler that always replies with a fixed status, used for the
/// automatic CANCEL/481 responses spec.md §4.3.6 and §7 describe (these
/// aren't the application's decision, so they never reach [`UasHandler`]).
struct FixedReply(StatusCode);

#[async_trait]
impl UasHandler for FixedReply {
    async fn on_request(&self, _tx: TransactionId, request: &Request) -> UasAction {
        UasAction::Reply(build_response(request, self.0, None))
    }
}

/// A handler that always replies with an already-built response, used for
/// the automatic `405`/`420` responses below: the response body (the
/// `Allow`/`Unsupported` header) depends on the inbound request, so it's
/// built once at dispatch time rather than parameterized by status alone.
struct FixedResponse(Response);

#[async_trait]
impl UasHandler for FixedResponse {
    async fn on_request(&self, _tx: TransactionId, _request: &Request) -> UasAction {
        UasAction::Reply(self.0.clone())
    }
}

/// The closed set of standard methods (spec.md §3) this core's transaction
/// FSMs recognize, used for the `Allow` header on an automatic `405`.
const SUPPORTED_METHODS: &[Method] = &[
    Method::Invite,
    Method::Ack,
    Method::Bye,
    Method::Cancel,
    Method::Register,
    Method::Options,
    Method::Info,
    Method::Prack,
    Method::Subscribe,
    Method::Notify,
    Method::Publish,
    Method::Refer,
    Method::Message,
    Method::Update,
];

/// The first `Require`/`Proxy-Require` option-tag on `request`, if any. This
/// core implements no SIP extensions, so any option tag a peer requires is
/// by definition unsupported (spec.md §7).
fn required_extension(request: &Request) -> Option<String> {
    for header_name in ["Require", "Proxy-Require"] {
        if let Some(TypedHeader::Other(header)) = request.headers.get(&HeaderName::Other(header_name.to_string())) {
            let value = header.value.to_string();
            if !value.trim().is_empty() {
                return Some(value);
            }
        }
    }
    None
}

/// The process-wide (but explicitly constructed — spec.md §9) core tying
/// together the transport, the transaction/dialog registries, and the
/// application's handler pair.
pub struct SipCore {
    transport: Arc<dyn Transport>,
    resolver: Arc<dyn Resolver>,
    transactions: Arc<TransactionRegistry>,
    dialogs: Arc<DialogRegistry>,
    timers: TimerProfile,
    uas_handler: Arc<dyn UasHandler>,
    uac_handler: Arc<dyn UacHandler>,
}

impl SipCore {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transport: Arc<dyn Transport>,
        resolver: Arc<dyn Resolver>,
        timers: TimerProfile,
        uas_handler: Arc<dyn UasHandler>,
        uac_handler: Arc<dyn UacHandler>,
    ) -> Arc<Self> {
        Arc::new(SipCore {
            transport,
            resolver,
            transactions: Arc::new(TransactionRegistry::new()),
            dialogs: Arc::new(DialogRegistry::new()),
            timers,
            uas_handler,
            uac_handler,
        })
    }

    pub fn transactions(&self) -> &Arc<TransactionRegistry> {
        &self.transactions
    }

    pub fn dialogs(&self) -> &Arc<DialogRegistry> {
        &self.dialogs
    }

    /// Starts an outbound client transaction for `request` (spec.md §4.2
    /// "Outbound path for requests"): the destination is the top `Route`
    /// if one was inserted (in-dialog requests insert their route set —
    /// `sip_dialog_core::dialog::Dialog::build_request`), else the
    /// Request-URI, resolved through the configured [`Resolver`].
    ///
    /// `request` need not carry a top `Via` yet — one is added here with a
    /// fresh branch if missing, since the client transaction FSMs key
    /// themselves off whatever branch is already on the request at spawn
    /// time.
    pub async fn send_request(&self, mut request: Request) -> Result<TransactionId, EngineError> {
        let destination = self.resolve_destination(&request).await?;
        if request.headers.get(&HeaderName::Via).is_none() {
            request = request.with_header(TypedHeader::Via(self.fresh_via()));
        }
        let method = request.method.clone();
        let key = if method == Method::Invite {
            let handle = invite_client::spawn(request, self.transport.clone(), destination, self.timers, self.uac_handler.clone());
            let key = handle.key().clone();
            self.transactions.insert_client(handle)?;
            key
        } else {
            let handle = non_invite_client::spawn(request, self.transport.clone(), destination, self.timers, self.uac_handler.clone());
            let key = handle.key().clone();
            self.transactions.insert_client(handle)?;
            key
        };
        Ok(key)
    }

    /// A top `Via` naming this core's own transport-local address, with a
    /// fresh RFC 3261 §8.1.1.7 branch.
    fn fresh_via(&self) -> sip_core::types::via::Via {
        let local = self.transport.local_addr();
        let kind = self.transport.kind();
        sip_core::types::via::Via::new_simple("SIP", "2.0", kind.as_str(), local.ip().to_string(), Some(local.port()), vec![])
            .expect("local address is always a valid Via host")
    }

    async fn resolve_destination(&self, request: &Request) -> Result<SocketAddr, EngineError> {
        let target_uri = match request.headers.get(&HeaderName::Route) {
            Some(TypedHeader::Route(route)) => route.iter().next().map(|addr| addr.uri.clone()),
            _ => None,
        }
        .unwrap_or_else(|| request.uri.clone());

        let host = target_uri.host.as_str();
        let transport_kind = self.transport.kind();
        let (ip, resolved_port) = self.resolver.resolve(&host, transport_kind).await?;
        let port = target_uri.port.unwrap_or(resolved_port);
        Ok(SocketAddr::new(ip, port))
    }

    async fn handle_inbound_request(&self, request: Request, source: Source) {
        let branch = transaction_id(&request.headers).unwrap_or_default();

        match request.method {
            Method::Ack => self.handle_ack(request, source, branch).await,
            Method::Cancel => self.handle_cancel(request, source, branch).await,
            _ => self.handle_ordinary_request(request, source, branch).await,
        }
    }

    async fn handle_ack(&self, request: Request, source: Source, branch: String) {
        let key = TransactionKey::new(branch, Method::Invite, Role::Server);
        match self.transactions.server(&key) {
            Some(server) => server.on_ack(request, source).await,
            None => {
                debug!(%key, "stray ACK matched no INVITE server transaction");
                self.uas_handler.on_ack(&request).await;
            }
        }
    }

    /// CANCEL correlation (spec.md §4.3.6): looked up by substituting
    /// `INVITE` for the CANCEL's own method into the transaction key. The
    /// CANCEL itself always runs its own non-INVITE server transaction and
    /// gets an automatic `200 OK` (or `481` if nothing matched); the
    /// target INVITE transaction is separately told to reply `487`.
    async fn handle_cancel(&self, request: Request, source: Source, branch: String) {
        let own_key = TransactionKey::new(branch.clone(), Method::Cancel, Role::Server);
        if let Some(existing) = self.transactions.server(&own_key) {
            existing.on_request(request, source).await;
            return;
        }

        let invite_key = TransactionKey::cancel_target(branch);
        let status = match self.transactions.server(&invite_key) {
            Some(invite_tx) => {
                invite_tx.on_cancel().await;
                self.uas_handler.on_cancel(invite_key).await;
                StatusCode::Ok
            }
            None => StatusCode::CallOrTransactionDoesNotExist,
        };

        let handle =
            non_invite_server::spawn(request, source, self.transport.clone(), self.timers, Arc::new(FixedReply(status)));
        if let Err(error) = self.transactions.insert_server(handle) {
            warn!(%error, "failed to register CANCEL transaction");
        }
    }

    async fn handle_ordinary_request(&self, request: Request, source: Source, branch: String) {
        let key = TransactionKey::new(branch, request.method.clone(), Role::Server);
        if let Some(existing) = self.transactions.server(&key) {
            existing.on_request(request, source).await;
            return;
        }

        // spec.md §7: an unrecognized method gets an automatic `405` with
        // `Allow`, and a `Require`/`Proxy-Require` naming an extension this
        // core doesn't implement gets an automatic `420` — neither reaches
        // the application's `UasHandler::on_request`.
        if !SUPPORTED_METHODS.contains(&request.method) {
            let response = method_not_allowed(&request, SUPPORTED_METHODS);
            let handle = non_invite_server::spawn(request, source, self.transport.clone(), self.timers, Arc::new(FixedResponse(response)));
            if let Err(error) = self.transactions.insert_server(handle) {
                warn!(%error, "failed to register 405 transaction");
            }
            return;
        }
        if let Some(unsupported) = required_extension(&request) {
            let response = bad_extension(&request, &unsupported);
            let handle = non_invite_server::spawn(request, source, self.transport.clone(), self.timers, Arc::new(FixedResponse(response)));
            if let Err(error) = self.transactions.insert_server(handle) {
                warn!(%error, "failed to register 420 transaction");
            }
            return;
        }

        let result = if request.method == Method::Invite {
            let handle = invite_server::spawn(request, source, self.transport.clone(), self.timers, self.uas_handler.clone());
            self.transactions.insert_server(handle)
        } else {
            let handle =
                non_invite_server::spawn(request, source, self.transport.clone(), self.timers, self.uas_handler.clone());
            self.transactions.insert_server(handle)
        };
        if let Err(error) = result {
            warn!(%error, "failed to register server transaction");
        }
    }

    async fn handle_inbound_response(&self, response: Response, source: Source) {
        let branch = transaction_id(&response.headers).unwrap_or_default();
        let cseq_method = match response.headers.get(&HeaderName::CSeq) {
            Some(TypedHeader::CSeq(cseq)) => cseq.method.clone(),
            _ => {
                warn!(%branch, "response has no CSeq, dropping");
                return;
            }
        };
        let key = TransactionKey::new(branch, cseq_method, Role::Client);
        match self.transactions.client(&key) {
            Some(client) => client.on_response(response, source).await,
            None => warn!(%key, "unmatched response dropped"),
        }
    }
}

#[async_trait]
impl DatagramSink for SipCore {
    async fn on_datagram(&self, source: Source, message: Message) {
        match message {
            Message::Request(request) => self.handle_inbound_request(request, source).await,
            Message::Response(response) => self.handle_inbound_response(response, source).await,
        }
    }
}

/// Builds the `405 Method Not Allowed` automatic reply spec.md §7 requires
/// for unrecognized methods, carrying an `Allow` enumerating the methods
/// this core's `UasHandler` actually supports.
pub fn method_not_allowed(request: &Request, allowed: &[Method]) -> Response {
    let allow = allowed.iter().map(Method::to_string).collect::<Vec<_>>().join(", ");
    let mut response = build_response(request, StatusCode::MethodNotAllowed, None);
    response = response.with_header(TypedHeader::Other(sip_core::types::headers::Header::new(
        HeaderName::Other("Allow".to_string()),
        sip_core::types::headers::HeaderValue::Raw(allow.into_bytes()),
    )));
    response
}

/// Builds the `420 Bad Extension` automatic reply spec.md §7 requires when
/// a `Require`/`Proxy-Require` names an unsupported extension tag.
pub fn bad_extension(request: &Request, unsupported: &str) -> Response {
    build_response(request, StatusCode::BadExtension, None).with_header(TypedHeader::Other(sip_core::types::headers::Header::new(
        HeaderName::Other("Unsupported".to_string()),
        sip_core::types::headers::HeaderValue::Raw(unsupported.as_bytes().to_vec()),
    )))
}
