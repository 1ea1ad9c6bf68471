//! INVITE client transaction (RFC 3261 §17.1.1):
//! `calling -> proceeding -> completed -> terminated`, with a direct jump
//! to `terminated` on 2xx.

use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use sip_core::builder::RequestBuilder;
use sip_core::serializer::{serialize_request, SerializeContext};
use sip_core::types::headers::{HeaderName, TypedHeader};
use sip_core::types::message::{Request, Response};
use sip_core::types::method::Method;
use sip_core::types::transport::Source;
use sip_transport::Transport;
use tokio::sync::mpsc;
use tokio::time::Sleep;
use tracing::{debug, info, warn};

use crate::error::TransactionError;
use crate::handler::{TransactionResult, UacAction, UacHandler};
use crate::timer::TimerProfile;
use crate::transaction::{ClientTransaction, Role, Transaction, TransactionKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Calling,
    Proceeding,
    Completed,
    Terminated,
}

enum Command {
    Response(Response, Source),
    Cancel,
}

/// A live handle to a spawned INVITE client transaction actor.
pub struct InviteClientHandle {
    key: TransactionKey,
    commands: mpsc::Sender<Command>,
    terminated: Arc<AtomicBool>,
    created_at: std::time::Instant,
}

impl Transaction for InviteClientHandle {
    fn key(&self) -> &TransactionKey {
        &self.key
    }

    fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    fn created_at(&self) -> std::time::Instant {
        self.created_at
    }
}

#[async_trait]
impl ClientTransaction for InviteClientHandle {
    async fn on_response(&self, response: Response, source: Source) {
        if self.commands.send(Command::Response(response, source)).await.is_err() {
            warn!(key = %self.key, "INVITE client transaction mailbox closed, dropping response");
        }
    }

    async fn cancel(&self) {
        let _ = self.commands.send(Command::Cancel).await;
    }
}

fn top_via_branch(request: &Request) -> Option<String> {
    match request.headers.get(&HeaderName::Via) {
        Some(TypedHeader::Via(via)) => via.branch().map(str::to_string),
        _ => None,
    }
}

/// Builds the automatic ACK for a non-2xx final response (spec.md §4.3.5):
/// same Request-URI, `To` carrying the response's tag, same `From`/
/// `Call-ID`, `CSeq = <n> ACK`, identical top `Via` (same branch).
fn build_ack(original: &Request, response: &Response) -> Request {
    let via = original.headers.get(&HeaderName::Via).cloned();
    let from = original.headers.get(&HeaderName::From).cloned();
    let to = response.headers.get(&HeaderName::To).cloned();
    let call_id = match original.headers.get(&HeaderName::CallId) {
        Some(TypedHeader::CallId(call_id)) => call_id.0.clone(),
        _ => String::new(),
    };
    let cseq_number = match original.headers.get(&HeaderName::CSeq) {
        Some(TypedHeader::CSeq(cseq)) => cseq.number,
        _ => 0,
    };

    let mut builder = RequestBuilder::new(Method::Ack, original.uri.clone()).call_id(call_id).cseq(cseq_number).max_forwards(70);
    if let Some(via) = via {
        builder = builder.header(via);
    }
    if let Some(from) = from {
        builder = builder.header(from);
    }
    if let Some(to) = to {
        builder = builder.header(to);
    }
    builder.build()
}

/// Spawns an INVITE client transaction for `request` (which must already
/// carry a top `Via` with a fresh branch) and sends it to `destination`.
pub fn spawn(
    request: Request,
    transport: Arc<dyn Transport>,
    destination: SocketAddr,
    timers: TimerProfile,
    handler: Arc<dyn UacHandler>,
) -> Arc<InviteClientHandle> {
    let branch = top_via_branch(&request).expect("INVITE client transaction requires a top Via with a branch");
    let key = TransactionKey::new(branch, Method::Invite, Role::Client);
    let (tx, rx) = mpsc::channel(1024);
    let terminated = Arc::new(AtomicBool::new(false));
    let handle =
        Arc::new(InviteClientHandle { key: key.clone(), commands: tx, terminated: terminated.clone(), created_at: std::time::Instant::now() });

    tokio::spawn(run(key, request, transport, destination, timers, handler, rx, terminated));
    handle
}

#[allow(clippy::too_many_arguments)]
async fn run(
    key: TransactionKey,
    request: Request,
    transport: Arc<dyn Transport>,
    destination: SocketAddr,
    timers: TimerProfile,
    handler: Arc<dyn UacHandler>,
    mut rx: mpsc::Receiver<Command>,
    terminated: Arc<AtomicBool>,
) {
    let datagram = transport.kind().is_datagram();
    let local = transport.local_addr();
    let ctx = SerializeContext::new(transport.kind(), local.ip().to_string(), local.port());
    let bytes = serialize_request(&request, &ctx);

    if let Err(error) = transport.send(destination, bytes.clone()).await {
        warn!(key = %key, %error, "INVITE send failed");
        handler.on_error(TransactionError::Transport(error)).await;
        handler.on_error(TransactionError::Timeout).await;
        return;
    }

    let mut state = State::Calling;
    let mut pending_cancel = false;

    let mut timer_a_interval = timers.retransmit_initial();
    let mut timer_a: Option<Pin<Box<Sleep>>> = if datagram { Some(Box::pin(tokio::time::sleep(timer_a_interval))) } else { None };
    let mut timer_b: Option<Pin<Box<Sleep>>> = Some(Box::pin(tokio::time::sleep(timers.timer_b())));
    let mut timer_d: Option<Pin<Box<Sleep>>> = None;
    let mut cancel_grace: Option<Pin<Box<Sleep>>> = Some(Box::pin(tokio::time::sleep(Duration::from_millis(200))));

    let mut ack: Option<Bytes> = None;

    loop {
        tokio::select! {
            maybe_cmd = rx.recv() => {
                match maybe_cmd {
                    Some(Command::Response(response, _source)) => {
                        let status = response.status_code;
                        if state == State::Completed {
                            if let Some(ack_bytes) = ack.clone() {
                                let _ = transport.send(destination, ack_bytes).await;
                            }
                        } else if status.is_provisional() {
                            if state == State::Calling {
                                state = State::Proceeding;
                                timer_a = None;
                                debug!(key = %key, "1xx received, -> proceeding");
                            }
                            let action = handler.on_provisional(&response).await;
                            handle_uac_action(action, &handler).await;
                            if pending_cancel {
                                send_cancel(&request, &transport, destination, &ctx).await;
                                pending_cancel = false;
                                cancel_grace = None;
                            }
                        } else if status.is_success() {
                            timer_a = None;
                            timer_b = None;
                            state = State::Terminated;
                            terminated.store(true, Ordering::Release);
                            let action = handler.on_success(&response).await;
                            handle_uac_action(action, &handler).await;
                            handler.on_transaction_result(key.clone(), TransactionResult::Success(response)).await;
                            break;
                        } else {
                            timer_a = None;
                            timer_b = None;
                            state = State::Completed;
                            let ack_request = build_ack(&request, &response);
                            let ack_bytes = serialize_request(&ack_request, &ctx);
                            let _ = transport.send(destination, ack_bytes.clone()).await;
                            ack = Some(ack_bytes);
                            timer_d = Some(Box::pin(tokio::time::sleep(timers.timer_d(datagram))));

                            let action = match status.is_redirection() {
                                true => handler.on_redirect(&response).await,
                                false if status.is_client_error() => handler.on_client_error(&response).await,
                                false if status.is_server_error() => handler.on_server_error(&response).await,
                                false => handler.on_global_failure(&response).await,
                            };
                            handle_uac_action(action, &handler).await;
                            handler.on_transaction_result(key.clone(), TransactionResult::FinalNonSuccess(response)).await;
                        }
                    }
                    Some(Command::Cancel) => {
                        if state == State::Calling && cancel_grace.is_some() {
                            pending_cancel = true;
                        } else if state == State::Calling || state == State::Proceeding {
                            send_cancel(&request, &transport, destination, &ctx).await;
                        }
                    }
                    None => break,
                }
            }
            _ = async { timer_a.as_mut().unwrap().as_mut().await }, if timer_a.is_some() => {
                let _ = transport.send(destination, bytes.clone()).await;
                timer_a_interval = timers.retransmit_next(timer_a_interval);
                timer_a = Some(Box::pin(tokio::time::sleep(timer_a_interval)));
            }
            _ = async { timer_b.as_mut().unwrap().as_mut().await }, if timer_b.is_some() => {
                state = State::Terminated;
                terminated.store(true, Ordering::Release);
                handler.on_error(TransactionError::Timeout).await;
                handler.on_transaction_result(key.clone(), TransactionResult::Timeout).await;
                break;
            }
            _ = async { timer_d.as_mut().unwrap().as_mut().await }, if timer_d.is_some() => {
                state = State::Terminated;
                terminated.store(true, Ordering::Release);
                break;
            }
            _ = async { cancel_grace.as_mut().unwrap().as_mut().await }, if cancel_grace.is_some() => {
                cancel_grace = None;
                if pending_cancel {
                    send_cancel(&request, &transport, destination, &ctx).await;
                    pending_cancel = false;
                }
            }
        }
    }

    info!(key = %key, ?state, "INVITE client transaction terminated");
}

async fn send_cancel(original: &Request, transport: &Arc<dyn Transport>, destination: SocketAddr, ctx: &SerializeContext) {
    let via = original.headers.get(&HeaderName::Via).cloned();
    let from = original.headers.get(&HeaderName::From).cloned();
    let to = original.headers.get(&HeaderName::To).cloned();
    let call_id = match original.headers.get(&HeaderName::CallId) {
        Some(TypedHeader::CallId(call_id)) => call_id.0.clone(),
        _ => String::new(),
    };
    let cseq_number = match original.headers.get(&HeaderName::CSeq) {
        Some(TypedHeader::CSeq(cseq)) => cseq.number,
        _ => 0,
    };
    let mut builder = RequestBuilder::new(Method::Cancel, original.uri.clone()).call_id(call_id).cseq(cseq_number).max_forwards(70);
    if let Some(via) = via {
        builder = builder.header(via);
    }
    if let Some(from) = from {
        builder = builder.header(from);
    }
    if let Some(to) = to {
        builder = builder.header(to);
    }
    let bytes = serialize_request(&builder.build(), ctx);
    let _ = transport.send(destination, bytes).await;
}

async fn handle_uac_action(action: UacAction, handler: &Arc<dyn UacHandler>) {
    if let UacAction::Stop { reason } = action {
        debug!(reason, "application requested stop");
    } else if let UacAction::FollowRedirect = action {
        let _ = handler;
    }
}
