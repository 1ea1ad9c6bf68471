//! Shared test scaffolding for the transaction/dialog integration tests,
//! grounded in the reference crate's `transaction_test_utils::MockTransport`
//! (a queue of sent messages plus a notifier, rather than a real socket).

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use sip_core::types::transport::TransportKind;
use sip_dialog_core::{TransactionResult, UacAction, UacHandler, UasAction, UasHandler};
use sip_core::types::message::{Request, Response};
use sip_core::types::status::StatusCode;
use sip_dialog_core::TransactionId;
use sip_transport::Transport;
use tokio::sync::Notify;

/// A [`Transport`] that records every send instead of touching a socket.
pub struct MockTransport {
    local_addr: SocketAddr,
    kind: TransportKind,
    sent: Mutex<VecDeque<(SocketAddr, Bytes)>>,
    notify: Notify,
    closed: AtomicBool,
    discard: AtomicBool,
}

impl MockTransport {
    pub fn new(local_addr: &str, kind: TransportKind) -> Self {
        MockTransport {
            local_addr: local_addr.parse().unwrap(),
            kind,
            sent: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
            closed: AtomicBool::new(false),
            discard: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent `send` silently drop the bytes, simulating a
    /// peer that never answers (spec.md §8 scenario 2).
    pub fn discard_sends(&self) {
        self.discard.store(true, Ordering::Release);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn drain(&self) -> Vec<(SocketAddr, Bytes)> {
        self.sent.lock().unwrap().drain(..).collect()
    }

    pub async fn wait_for_send(&self, timeout: std::time::Duration) {
        let _ = tokio::time::timeout(timeout, self.notify.notified()).await;
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn kind(&self) -> TransportKind {
        self.kind
    }

    fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    async fn send(&self, destination: SocketAddr, bytes: Bytes) -> sip_transport::Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(sip_transport::Error::Closed);
        }
        if !self.discard.load(Ordering::Acquire) {
            self.sent.lock().unwrap().push_back((destination, bytes));
            self.notify.notify_one();
        }
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// A [`UacHandler`]/[`UasHandler`] that records every callback it receives,
/// for assertions, and lets a test script a fixed reply for `on_request`.
#[derive(Default)]
pub struct RecordingHandler {
    pub provisional: Mutex<Vec<Response>>,
    pub success: Mutex<Vec<Response>>,
    pub final_non_success: Mutex<Vec<Response>>,
    pub results: Mutex<Vec<(TransactionId, String)>>,
    pub requests: Mutex<Vec<Request>>,
    pub reply_with: Mutex<Option<Response>>,
    pub notify: Notify,
}

impl RecordingHandler {
    pub fn new() -> Self {
        RecordingHandler::default()
    }

    pub fn reply_with(&self, response: Response) {
        *self.reply_with.lock().unwrap() = Some(response);
    }
}

#[async_trait]
impl UacHandler for RecordingHandler {
    async fn on_provisional(&self, response: &Response) -> UacAction {
        self.provisional.lock().unwrap().push(response.clone());
        self.notify.notify_one();
        UacAction::Ok
    }

    async fn on_success(&self, response: &Response) -> UacAction {
        self.success.lock().unwrap().push(response.clone());
        self.notify.notify_one();
        UacAction::Ok
    }

    async fn on_redirect(&self, response: &Response) -> UacAction {
        self.final_non_success.lock().unwrap().push(response.clone());
        self.notify.notify_one();
        UacAction::Ok
    }

    async fn on_client_error(&self, response: &Response) -> UacAction {
        self.final_non_success.lock().unwrap().push(response.clone());
        self.notify.notify_one();
        UacAction::Ok
    }

    async fn on_transaction_result(&self, tx: TransactionId, result: TransactionResult) {
        let label = match result {
            TransactionResult::Success(_) => "success",
            TransactionResult::FinalNonSuccess(_) => "final_non_success",
            TransactionResult::Timeout => "timeout",
            TransactionResult::Error(_) => "error",
        };
        self.results.lock().unwrap().push((tx, label.to_string()));
        self.notify.notify_one();
    }
}

#[async_trait]
impl UasHandler for RecordingHandler {
    async fn on_request(&self, _tx: TransactionId, request: &Request) -> UasAction {
        self.requests.lock().unwrap().push(request.clone());
        self.notify.notify_one();
        match self.reply_with.lock().unwrap().take() {
            Some(response) => UasAction::Reply(response),
            None => UasAction::Process,
        }
    }
}

/// A scaled-down [`sip_dialog_core::TimerProfile`] so Timer B/F/H-scale
/// waits resolve in milliseconds rather than real RFC 3261 seconds.
pub fn fast_timers() -> sip_dialog_core::TimerProfile {
    sip_dialog_core::TimerProfile::new(
        std::time::Duration::from_millis(20),
        std::time::Duration::from_millis(80),
        std::time::Duration::from_millis(80),
    )
}

pub fn trying() -> StatusCode {
    StatusCode::Trying
}
