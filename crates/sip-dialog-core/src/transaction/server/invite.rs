//! INVITE server transaction (RFC 3261 §17.2.1):
//! `proceeding -> completed -> confirmed -> terminated`, with a direct jump
//! to `terminated` on 2xx.

use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use sip_core::serializer::serialize_response;
use sip_core::types::headers::HeaderName;
use sip_core::types::message::{Request, Response};
use sip_core::types::status::StatusCode;
use sip_core::types::transport::Source;
use sip_transport::Transport;
use tokio::sync::mpsc;
use tokio::time::Sleep;
use tracing::{debug, info, warn};

use crate::handler::{TransactionId, UasAction, UasHandler};
use crate::timer::TimerProfile;
use crate::transaction::server::common::{build_response, generate_tag};
use crate::transaction::{Role, ServerTransaction, Transaction, TransactionKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Proceeding,
    Completed,
    Confirmed,
    Terminated,
}

enum Command {
    /// The application supplied a response to send.
    Reply(Response),
    /// The peer retransmitted the INVITE (same branch).
    RetransmitInvite,
    /// An ACK matched this transaction's branch.
    Ack(Request, Source),
    /// A CANCEL matched this transaction's branch.
    Cancel,
}

/// A live handle to a spawned INVITE server transaction actor.
pub struct InviteServerHandle {
    key: TransactionKey,
    commands: mpsc::Sender<Command>,
    terminated: Arc<AtomicBool>,
    created_at: std::time::Instant,
}

impl Transaction for InviteServerHandle {
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

impl InviteServerHandle {
    /// Sends a response through this transaction (the application's side of
    /// the `UasAction::Reply`/out-of-band driving paths in spec.md §6.4).
    pub async fn reply(&self, response: Response) {
        if self.commands.send(Command::Reply(response)).await.is_err() {
            warn!(key = %self.key, "INVITE server transaction mailbox closed, dropping reply");
        }
    }
}

#[async_trait]
impl ServerTransaction for InviteServerHandle {
    async fn on_request(&self, _request: Request, _source: Source) {
        let _ = self.commands.send(Command::RetransmitInvite).await;
    }

    async fn on_ack(&self, request: Request, source: Source) {
        let _ = self.commands.send(Command::Ack(request, source)).await;
    }

    async fn on_cancel(&self) {
        let _ = self.commands.send(Command::Cancel).await;
    }
}

/// Spawns an INVITE server transaction for an inbound `request`, emits
/// `100 Trying` immediately (spec.md §4.3.3, §9 open question: this core
/// picks immediate emission over RFC 3261's optional 200 ms grace period),
/// and invokes `handler.on_request`.
pub fn spawn(
    request: Request,
    source: Source,
    transport: Arc<dyn Transport>,
    timers: TimerProfile,
    handler: Arc<dyn UasHandler>,
) -> Arc<InviteServerHandle> {
    let branch = match request.headers.get(&HeaderName::Via) {
        Some(sip_core::types::headers::TypedHeader::Via(via)) => via.branch().unwrap_or_default().to_string(),
        _ => String::new(),
    };
    let key = TransactionKey::new(branch, request.method.clone(), Role::Server);
    let (tx, rx) = mpsc::channel(1024);
    let terminated = Arc::new(AtomicBool::new(false));
    let handle =
        Arc::new(InviteServerHandle { key: key.clone(), commands: tx, terminated: terminated.clone(), created_at: std::time::Instant::now() });

    tokio::spawn(run(key, request, source, transport, timers, handler, rx, terminated));
    handle
}

#[allow(clippy::too_many_arguments)]
async fn run(
    key: TransactionKey,
    request: Request,
    source: Source,
    transport: Arc<dyn Transport>,
    timers: TimerProfile,
    handler: Arc<dyn UasHandler>,
    mut rx: mpsc::Receiver<Command>,
    terminated: Arc<AtomicBool>,
) {
    let datagram = transport.kind().is_datagram();
    let destination = source.remote;

    let mut state = State::Proceeding;
    let mut last_response: Option<Bytes> = None;

    let trying = build_response(&request, StatusCode::Trying, None);
    let trying_bytes = serialize_response(&trying);
    let _ = transport.send(destination, trying_bytes.clone()).await;
    last_response = Some(trying_bytes);

    let tx_id: TransactionId = key.clone();
    let action = handler.on_request(tx_id, &request).await;
    if let UasAction::Reply(response) = action {
        let bytes = serialize_response(&response);
        let _ = transport.send(destination, bytes.clone()).await;
        last_response = Some(bytes);
        if response.status_code.is_success() {
            state = State::Terminated;
            terminated.store(true, Ordering::Release);
        } else if !response.status_code.is_provisional() {
            state = State::Completed;
        }
    }

    let mut timer_g_interval = timers.timer_g_initial();
    let mut timer_g: Option<Pin<Box<Sleep>>> = None;
    let mut timer_h: Option<Pin<Box<Sleep>>> = None;
    let mut timer_i: Option<Pin<Box<Sleep>>> = None;

    if state == State::Completed {
        if datagram {
            timer_g = Some(Box::pin(tokio::time::sleep(timer_g_interval)));
        }
        timer_h = Some(Box::pin(tokio::time::sleep(timers.timer_h())));
    }

    while state != State::Terminated {
        tokio::select! {
            maybe_cmd = rx.recv() => {
                match maybe_cmd {
                    Some(Command::Reply(response)) => {
                        if state != State::Proceeding {
                            continue;
                        }
                        let bytes = serialize_response(&response);
                        let _ = transport.send(destination, bytes.clone()).await;
                        last_response = Some(bytes);

                        if response.status_code.is_provisional() {
                            // Stay in `proceeding`.
                        } else if response.status_code.is_success() {
                            state = State::Terminated;
                            terminated.store(true, Ordering::Release);
                        } else {
                            state = State::Completed;
                            if datagram {
                                timer_g = Some(Box::pin(tokio::time::sleep(timer_g_interval)));
                            }
                            timer_h = Some(Box::pin(tokio::time::sleep(timers.timer_h())));
                        }
                    }
                    Some(Command::RetransmitInvite) => {
                        if let Some(bytes) = last_response.clone() {
                            let _ = transport.send(destination, bytes).await;
                        }
                    }
                    Some(Command::Ack(_ack, _ack_source)) => {
                        if state == State::Completed {
                            state = State::Confirmed;
                            timer_g = None;
                            timer_h = None;
                            timer_i = Some(Box::pin(tokio::time::sleep(timers.timer_i(datagram))));
                            debug!(key = %key, "ACK received, -> confirmed");
                        }
                    }
                    Some(Command::Cancel) => {
                        if state == State::Proceeding {
                            let tag = generate_tag();
                            let response = build_response(&request, StatusCode::RequestTerminated, Some(&tag));
                            let bytes = serialize_response(&response);
                            let _ = transport.send(destination, bytes.clone()).await;
                            last_response = Some(bytes);
                            state = State::Completed;
                            if datagram {
                                timer_g = Some(Box::pin(tokio::time::sleep(timer_g_interval)));
                            }
                            timer_h = Some(Box::pin(tokio::time::sleep(timers.timer_h())));
                        }
                    }
                    None => break,
                }
            }
            _ = async { timer_g.as_mut().unwrap().as_mut().await }, if timer_g.is_some() => {
                if let Some(bytes) = last_response.clone() {
                    let _ = transport.send(destination, bytes).await;
                }
                timer_g_interval = timers.retransmit_next(timer_g_interval);
                timer_g = Some(Box::pin(tokio::time::sleep(timer_g_interval)));
            }
            _ = async { timer_h.as_mut().unwrap().as_mut().await }, if timer_h.is_some() => {
                warn!(key = %key, "Timer H fired: no ACK received");
                state = State::Terminated;
                terminated.store(true, Ordering::Release);
                break;
            }
            _ = async { timer_i.as_mut().unwrap().as_mut().await }, if timer_i.is_some() => {
                state = State::Terminated;
                terminated.store(true, Ordering::Release);
                break;
            }
        }
    }

    terminated.store(true, Ordering::Release);
    info!(key = %key, "INVITE server transaction terminated");
}
