//! Non-INVITE client transaction (RFC 3261 §17.1.2):
//! `trying -> proceeding -> completed -> terminated`.

use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sip_core::serializer::{serialize_request, SerializeContext};
use sip_core::types::headers::HeaderName;
use sip_core::types::message::{Request, Response};
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
    Trying,
    Proceeding,
    Completed,
    Terminated,
}

enum Command {
    Response(Response, Source),
}

/// A live handle to a spawned non-INVITE client transaction actor.
pub struct NonInviteClientHandle {
    key: TransactionKey,
    commands: mpsc::Sender<Command>,
    terminated: Arc<AtomicBool>,
    created_at: std::time::Instant,
}

impl Transaction for NonInviteClientHandle {
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
impl ClientTransaction for NonInviteClientHandle {
    async fn on_response(&self, response: Response, source: Source) {
        if self.commands.send(Command::Response(response, source)).await.is_err() {
            warn!(key = %self.key, "non-INVITE client transaction mailbox closed, dropping response");
        }
    }

    /// Non-INVITE transactions have nothing to CANCEL target (RFC 3261 §9.1
    /// restricts CANCEL to INVITE); a stray cancel request is a no-op.
    async fn cancel(&self) {}
}

fn top_via_branch(request: &Request) -> Option<String> {
    match request.headers.get(&HeaderName::Via) {
        Some(sip_core::types::headers::TypedHeader::Via(via)) => via.branch().map(str::to_string),
        _ => None,
    }
}

/// Spawns a non-INVITE client transaction for `request` (which must already
/// carry a top `Via` with a fresh branch) and sends it to `destination`.
pub fn spawn(
    request: Request,
    transport: Arc<dyn Transport>,
    destination: SocketAddr,
    timers: TimerProfile,
    handler: Arc<dyn UacHandler>,
) -> Arc<NonInviteClientHandle> {
    let branch = top_via_branch(&request).expect("non-INVITE client transaction requires a top Via with a branch");
    let method = request.method.clone();
    let key = TransactionKey::new(branch, method, Role::Client);
    let (tx, rx) = mpsc::channel(1024);
    let terminated = Arc::new(AtomicBool::new(false));
    let handle = Arc::new(NonInviteClientHandle {
        key: key.clone(),
        commands: tx,
        terminated: terminated.clone(),
        created_at: std::time::Instant::now(),
    });

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
        warn!(key = %key, %error, "non-INVITE send failed");
        handler.on_error(TransactionError::Transport(error)).await;
        handler.on_error(TransactionError::Timeout).await;
        return;
    }

    let mut state = State::Trying;

    let mut timer_e_interval = timers.retransmit_initial();
    let mut timer_e: Option<Pin<Box<Sleep>>> = if datagram { Some(Box::pin(tokio::time::sleep(timer_e_interval))) } else { None };
    let mut timer_f: Option<Pin<Box<Sleep>>> = Some(Box::pin(tokio::time::sleep(timers.timer_f())));
    let mut timer_k: Option<Pin<Box<Sleep>>> = None;

    loop {
        tokio::select! {
            maybe_cmd = rx.recv() => {
                match maybe_cmd {
                    Some(Command::Response(response, _source)) => {
                        let status = response.status_code;
                        if state == State::Completed {
                            // Retransmissions of the final response are not
                            // observable to the application; nothing to re-emit.
                        } else if status.is_provisional() {
                            state = State::Proceeding;
                            // Timer E re-arms at T2 once in `proceeding` (§17.1.2.2).
                            if datagram {
                                timer_e_interval = timers.t2;
                                timer_e = Some(Box::pin(tokio::time::sleep(timer_e_interval)));
                            }
                            let action = handler.on_provisional(&response).await;
                            handle_uac_action(action);
                        } else {
                            timer_e = None;
                            timer_f = None;
                            state = State::Completed;
                            timer_k = Some(Box::pin(tokio::time::sleep(timers.timer_k(datagram))));

                            let action = if status.is_success() {
                                handler.on_success(&response).await
                            } else if status.is_redirection() {
                                handler.on_redirect(&response).await
                            } else if status.is_client_error() {
                                handler.on_client_error(&response).await
                            } else if status.is_server_error() {
                                handler.on_server_error(&response).await
                            } else {
                                handler.on_global_failure(&response).await
                            };
                            handle_uac_action(action);

                            let result = if status.is_success() {
                                TransactionResult::Success(response)
                            } else {
                                TransactionResult::FinalNonSuccess(response)
                            };
                            handler.on_transaction_result(key.clone(), result).await;
                        }
                    }
                    None => break,
                }
            }
            _ = async { timer_e.as_mut().unwrap().as_mut().await }, if timer_e.is_some() => {
                let _ = transport.send(destination, bytes.clone()).await;
                timer_e_interval = timers.retransmit_next(timer_e_interval);
                timer_e = Some(Box::pin(tokio::time::sleep(timer_e_interval)));
            }
            _ = async { timer_f.as_mut().unwrap().as_mut().await }, if timer_f.is_some() => {
                state = State::Terminated;
                terminated.store(true, Ordering::Release);
                handler.on_error(TransactionError::Timeout).await;
                handler.on_transaction_result(key.clone(), TransactionResult::Timeout).await;
                break;
            }
            _ = async { timer_k.as_mut().unwrap().as_mut().await }, if timer_k.is_some() => {
                state = State::Terminated;
                terminated.store(true, Ordering::Release);
                break;
            }
        }
    }

    debug!(key = %key, ?state, "non-INVITE client transaction terminated");
    info!(key = %key, "non-INVITE client transaction done");
}

fn handle_uac_action(action: UacAction) {
    if let UacAction::Stop { reason } = action {
        debug!(reason, "application requested stop");
    }
}
