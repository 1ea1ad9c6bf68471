//! Non-INVITE server transaction (RFC 3261 §17.2.2):
//! `trying -> proceeding -> completed -> terminated`. No automatic
//! provisional response is emitted.

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use sip_core::serializer::serialize_response;
use sip_core::types::headers::HeaderName;
use sip_core::types::message::{Request, Response};
use sip_core::types::transport::Source;
use sip_transport::Transport;
use tokio::sync::mpsc;
use tokio::time::Sleep;
use tracing::{info, warn};

use crate::handler::{TransactionId, UasAction, UasHandler};
use crate::timer::TimerProfile;
use crate::transaction::{Role, ServerTransaction, Transaction, TransactionKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Trying,
    Proceeding,
    Completed,
    Terminated,
}

enum Command {
    Reply(Response),
    RetransmitRequest,
}

/// A live handle to a spawned non-INVITE server transaction actor.
pub struct NonInviteServerHandle {
    key: TransactionKey,
    commands: mpsc::Sender<Command>,
    terminated: Arc<AtomicBool>,
    created_at: std::time::Instant,
}

impl Transaction for NonInviteServerHandle {
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

impl NonInviteServerHandle {
    pub async fn reply(&self, response: Response) {
        if self.commands.send(Command::Reply(response)).await.is_err() {
            warn!(key = %self.key, "non-INVITE server transaction mailbox closed, dropping reply");
        }
    }
}

#[async_trait]
impl ServerTransaction for NonInviteServerHandle {
    async fn on_request(&self, _request: Request, _source: Source) {
        let _ = self.commands.send(Command::RetransmitRequest).await;
    }

    /// ACK never runs as a non-INVITE transaction (spec.md §4.3.5); nothing to do.
    async fn on_ack(&self, _request: Request, _source: Source) {}
}

/// Spawns a non-INVITE server transaction for an inbound `request` and
/// invokes `handler.on_request`.
pub fn spawn(
    request: Request,
    source: Source,
    transport: Arc<dyn Transport>,
    timers: TimerProfile,
    handler: Arc<dyn UasHandler>,
) -> Arc<NonInviteServerHandle> {
    let branch = match request.headers.get(&HeaderName::Via) {
        Some(sip_core::types::headers::TypedHeader::Via(via)) => via.branch().unwrap_or_default().to_string(),
        _ => String::new(),
    };
    let key = TransactionKey::new(branch, request.method.clone(), Role::Server);
    let (tx, rx) = mpsc::channel(1024);
    let terminated = Arc::new(AtomicBool::new(false));
    let handle = Arc::new(NonInviteServerHandle {
        key: key.clone(),
        commands: tx,
        terminated: terminated.clone(),
        created_at: std::time::Instant::now(),
    });

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

    let mut state = State::Trying;
    let mut last_response: Option<Bytes> = None;

    let tx_id: TransactionId = key.clone();
    let action = handler.on_request(tx_id, &request).await;
    if let UasAction::Reply(response) = action {
        let bytes = serialize_response(&response);
        let _ = transport.send(destination, bytes.clone()).await;
        last_response = Some(bytes);
        state = if response.status_code.is_provisional() { State::Proceeding } else { State::Completed };
    }

    let mut timer_j: Option<Pin<Box<Sleep>>> = if state == State::Completed {
        Some(Box::pin(tokio::time::sleep(timers.timer_j(datagram))))
    } else {
        None
    };

    while state != State::Terminated {
        tokio::select! {
            maybe_cmd = rx.recv() => {
                match maybe_cmd {
                    Some(Command::Reply(response)) => {
                        if state == State::Completed || state == State::Terminated {
                            continue;
                        }
                        let bytes = serialize_response(&response);
                        let _ = transport.send(destination, bytes.clone()).await;
                        last_response = Some(bytes);

                        if response.status_code.is_provisional() {
                            state = State::Proceeding;
                        } else {
                            state = State::Completed;
                            timer_j = Some(Box::pin(tokio::time::sleep(timers.timer_j(datagram))));
                        }
                    }
                    Some(Command::RetransmitRequest) => {
                        if matches!(state, State::Proceeding | State::Completed) {
                            if let Some(bytes) = last_response.clone() {
                                let _ = transport.send(destination, bytes).await;
                            }
                        }
                    }
                    None => break,
                }
            }
            _ = async { timer_j.as_mut().unwrap().as_mut().await }, if timer_j.is_some() => {
                state = State::Terminated;
                terminated.store(true, Ordering::Release);
                break;
            }
        }
    }

    terminated.store(true, Ordering::Release);
    info!(key = %key, "non-INVITE server transaction terminated");
}
