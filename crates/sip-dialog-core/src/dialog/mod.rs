//! L4 — the per-call dialog state RFC 3261 §12 layers on top of the
//! transaction FSMs: tags, CSeq counters, route set, and the
//! `early`/`confirmed`/`terminated` lifecycle.
//!
//! Unlike a [`crate::transaction`], a dialog has no timer-driven
//! retransmission logic of its own (its only timer is the optional
//! subscription-expiry armed in [`Dialog::arm_subscription_expiry`]), so it
//! is modeled as a plain struct behind a short-critical-section mutex
//! rather than a dedicated actor task — mirroring the reference crate's
//! `DialogImpl`, which is itself a struct with methods, not a runner.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sip_core::builder::RequestBuilder;
use sip_core::types::address::Address;
use sip_core::types::headers::{HeaderName, TypedHeader};
use sip_core::types::message::{HeaderList, Request, Response};
use sip_core::types::method::Method;
use sip_core::types::uri::Uri;
use tokio::sync::oneshot;
use tracing::{info, warn};

/// Reads a `From`/`To` header as an [`Address`], following a `Raw`/`Other`
/// fallback the same way [`TypedHeader::from_header`] would if the codec
/// hadn't already typed it on parse.
fn address(headers: &HeaderList, name: &HeaderName) -> Option<Address> {
    match headers.get(name) {
        Some(TypedHeader::From(addr)) | Some(TypedHeader::To(addr)) => Some(addr.clone()),
        _ => None,
    }
}

fn call_id_of(request: &Request) -> Option<String> {
    match request.headers.get(&HeaderName::CallId) {
        Some(TypedHeader::CallId(call_id)) => Some(call_id.0.clone()),
        _ => None,
    }
}

fn cseq_number(headers: &HeaderList) -> Option<u32> {
    match headers.get(&HeaderName::CSeq) {
        Some(TypedHeader::CSeq(cseq)) => Some(cseq.number),
        _ => None,
    }
}

/// The peer's dialog-establishing `Contact`, which becomes our `remote_target`.
fn contact_uri(headers: &HeaderList) -> Option<Uri> {
    match headers.get(&HeaderName::Contact) {
        Some(TypedHeader::Contact(addrs)) => addrs.first().map(|a| a.uri.clone()),
        _ => None,
    }
}

/// `Record-Route` values in on-the-wire order (spec.md §4.4 reverses them
/// for the UAC side; callers do that themselves since the UAS side does not).
fn record_route_list(headers: &HeaderList) -> Vec<Uri> {
    headers
        .get_all(&HeaderName::RecordRoute)
        .filter_map(|h| match h {
            TypedHeader::RecordRoute(rr) => Some(rr.iter().map(|a| a.uri.clone()).collect::<Vec<_>>()),
            _ => None,
        })
        .flatten()
        .collect()
}

use crate::error::DialogError;
use crate::transaction::ClientTransaction;

/// Which side of the dialog this endpoint is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Uac,
    Uas,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Uac => Direction::Uas,
            Direction::Uas => Direction::Uac,
        }
    }
}

/// `(call_id, local_tag, remote_tag, direction)` — complete iff both tags
/// are present. The peer's view of the same dialog is [`DialogId::peer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DialogId {
    pub call_id: String,
    pub local_tag: String,
    pub remote_tag: String,
    pub direction: Direction,
}

impl DialogId {
    pub fn new(call_id: impl Into<String>, local_tag: impl Into<String>, remote_tag: impl Into<String>, direction: Direction) -> Self {
        DialogId { call_id: call_id.into(), local_tag: local_tag.into(), remote_tag: remote_tag.into(), direction }
    }

    /// The same dialog, seen from the other endpoint.
    pub fn peer(&self) -> DialogId {
        DialogId {
            call_id: self.call_id.clone(),
            local_tag: self.remote_tag.clone(),
            remote_tag: self.local_tag.clone(),
            direction: self.direction.flipped(),
        }
    }

    /// The canonical registry key, `"<call_id>;local=<lt>;remote=<rt>"` (spec.md §4.4).
    pub fn canonical(&self) -> String {
        format!("{};local={};remote={}", self.call_id, self.local_tag, self.remote_tag)
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogLifecycle {
    Early,
    Confirmed,
    Terminated,
}

struct Inner {
    lifecycle: DialogLifecycle,
    local_uri: Uri,
    remote_uri: Uri,
    local_target: Uri,
    remote_target: Uri,
    local_seq: u32,
    remote_seq: u32,
    route_set: Vec<Uri>,
}

/// A confirmed or early end-to-end SIP association (RFC 3261 §12).
pub struct Dialog {
    pub id: DialogId,
    pub secure: bool,
    inner: Mutex<Inner>,
    terminated: AtomicBool,
}

impl Dialog {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: DialogId,
        lifecycle: DialogLifecycle,
        local_uri: Uri,
        remote_uri: Uri,
        local_target: Uri,
        remote_target: Uri,
        local_seq: u32,
        remote_seq: u32,
        route_set: Vec<Uri>,
        secure: bool,
    ) -> Arc<Self> {
        Arc::new(Dialog {
            id,
            secure,
            terminated: AtomicBool::new(matches!(lifecycle, DialogLifecycle::Terminated)),
            inner: Mutex::new(Inner { lifecycle, local_uri, remote_uri, local_target, remote_target, local_seq, remote_seq, route_set }),
        })
    }

    /// UAC-side dialog creation (spec.md §4.4): the request this endpoint
    /// sent plus a dialog-establishing response to it (1xx-with-tag or
    /// 2xx to INVITE/SUBSCRIBE/REFER). Returns `None` if the response
    /// carries no `To` tag (not dialog-establishing) or either message
    /// lacks a mandatory header.
    pub fn from_uac(request: &Request, response: &Response) -> Option<Arc<Self>> {
        let call_id = call_id_of(request)?;
        let local = address(&request.headers, &HeaderName::From)?;
        let remote_request_side = address(&request.headers, &HeaderName::To)?;
        let remote = address(&response.headers, &HeaderName::To)?;
        let remote_tag = remote.tag()?.to_string();
        let local_tag = local.tag()?.to_string();

        let remote_target = contact_uri(&response.headers).unwrap_or_else(|| remote_request_side.uri.clone());
        let mut route_set = record_route_list(&response.headers);
        route_set.reverse();

        let local_seq = cseq_number(&request.headers).unwrap_or(0);
        let lifecycle = if response.status_code.is_success() { DialogLifecycle::Confirmed } else { DialogLifecycle::Early };
        let secure = request.uri.scheme == sip_core::types::uri::Scheme::Sips && request.source.map(|s| s.transport.is_secure()).unwrap_or(false);

        Some(Dialog::new(
            DialogId::new(call_id, local_tag, remote_tag, Direction::Uac),
            lifecycle,
            local.uri.clone(),
            remote_request_side.uri.clone(),
            local.uri.clone(),
            remote_target,
            local_seq,
            0,
            route_set,
            secure,
        ))
    }

    /// UAS-side dialog creation (spec.md §4.4): the inbound request plus
    /// the response this endpoint is about to send to it.
    pub fn from_uas(request: &Request, response: &Response) -> Option<Arc<Self>> {
        let call_id = call_id_of(request)?;
        let remote = address(&request.headers, &HeaderName::From)?;
        let local_request_side = address(&request.headers, &HeaderName::To)?;
        let local = address(&response.headers, &HeaderName::To)?;
        let local_tag = local.tag()?.to_string();
        let remote_tag = remote.tag()?.to_string();

        let remote_target = contact_uri(&request.headers).unwrap_or_else(|| remote.uri.clone());
        let mut route_set = record_route_list(&request.headers);
        if route_set.is_empty() {
            route_set = record_route_list(&response.headers);
        }

        let remote_seq = cseq_number(&request.headers).unwrap_or(0);
        let lifecycle = if response.status_code.is_success() { DialogLifecycle::Confirmed } else { DialogLifecycle::Early };
        let secure = request.uri.scheme == sip_core::types::uri::Scheme::Sips && request.source.map(|s| s.transport.is_secure()).unwrap_or(false);

        Some(Dialog::new(
            DialogId::new(call_id, local_tag, remote_tag, Direction::Uas),
            lifecycle,
            local_request_side.uri.clone(),
            remote.uri.clone(),
            local_request_side.uri.clone(),
            remote_target,
            0,
            remote_seq,
            route_set,
            secure,
        ))
    }

    pub fn lifecycle(&self) -> DialogLifecycle {
        self.inner.lock().unwrap().lifecycle
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    /// `early -> confirmed` on the 2xx to the initial INVITE/SUBSCRIBE.
    pub fn confirm(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.lifecycle == DialogLifecycle::Early {
            inner.lifecycle = DialogLifecycle::Confirmed;
            info!(dialog = %self.id, "dialog confirmed");
        }
    }

    pub fn terminate(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.lifecycle = DialogLifecycle::Terminated;
        self.terminated.store(true, Ordering::Release);
        info!(dialog = %self.id, "dialog terminated");
    }

    /// Target refresh (spec.md §4.4): a non-ACK/non-CANCEL in-dialog request
    /// or its 2xx, carrying a `Contact`, updates the peer's remote target.
    pub fn refresh_target(&self, new_target: Uri) {
        let mut inner = self.inner.lock().unwrap();
        inner.remote_target = new_target;
    }

    pub fn remote_target(&self) -> Uri {
        self.inner.lock().unwrap().remote_target.clone()
    }

    /// Validates and bumps `remote_seq` for an inbound in-dialog request.
    /// ACK never bumps CSeq (it reuses the INVITE's).
    pub fn validate_remote_cseq(&self, method: &Method, cseq: u32) -> Result<(), DialogError> {
        if *method == Method::Ack {
            return Ok(());
        }
        let mut inner = self.inner.lock().unwrap();
        if cseq < inner.remote_seq {
            return Err(DialogError::SequenceViolation { expected: inner.remote_seq, actual: cseq });
        }
        inner.remote_seq = cseq;
        Ok(())
    }

    /// Builds an in-dialog request (spec.md §4.4, UAC side): fresh branch,
    /// `Request-URI = remote_target`, route set inserted as `Route`
    /// headers, `CSeq` incremented from `local_seq`.
    pub fn build_request(&self, method: Method) -> Result<Request, DialogError> {
        if self.is_terminated() {
            return Err(DialogError::Terminated);
        }
        let mut inner = self.inner.lock().unwrap();
        inner.local_seq += 1;
        let cseq = inner.local_seq;
        let request_uri = inner.remote_target.clone();

        let mut builder = RequestBuilder::new(method, request_uri)
            .from("", &inner.local_uri.to_string(), Some(&self.id.local_tag))
            .to("", &inner.remote_uri.to_string(), Some(&self.id.remote_tag))
            .call_id(self.id.call_id.clone())
            .cseq(cseq);

        for route in inner.route_set.iter() {
            builder = builder.header(TypedHeader::Route(sip_core::types::route::Route(vec![Address::new(route.clone())])));
        }
        Ok(builder.build())
    }

    /// On a 2xx with a `Contact` header to the non-ACK request that
    /// refreshed the dialog, update the peer's remote target.
    pub fn observe_response(&self, response: &Response) {
        if response.status_code.is_success() {
            if let Some(TypedHeader::Contact(contacts)) = response.header(&sip_core::types::headers::HeaderName::Contact) {
                if let Some(contact) = contacts.first() {
                    self.refresh_target(contact.uri.clone());
                }
            }
        }
    }

    /// Terminates the dialog (and cancels `pending_invite` if still live)
    /// once `owner_gone` resolves — modeling spec.md §9's "weak reference
    /// to owner" as liveness-via-channel rather than ownership.
    pub fn bind_owner(self: &Arc<Self>, owner_gone: oneshot::Receiver<()>, pending_invite: Option<Arc<dyn ClientTransaction>>) {
        let dialog = self.clone();
        tokio::spawn(async move {
            let _ = owner_gone.await;
            if !dialog.is_terminated() {
                warn!(dialog = %dialog.id, "owner died before a final response; cancelling and terminating");
                if let Some(tx) = pending_invite {
                    tx.cancel().await;
                }
                dialog.terminate();
            }
        });
    }

    /// Arms the SUBSCRIBE/NOTIFY subscription-expiry timer (spec.md §4.4).
    pub fn arm_subscription_expiry(self: &Arc<Self>, expires: Duration) {
        let dialog = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(expires).await;
            if !dialog.is_terminated() {
                info!(dialog = %dialog.id, "subscription expired");
                dialog.terminate();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sip_core::types::uri::Uri;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    fn make_dialog() -> Arc<Dialog> {
        Dialog::new(
            DialogId::new("call1@atlanta.com", "1928301774", "a6c85cf", Direction::Uac),
            DialogLifecycle::Confirmed,
            uri("sip:alice@atlanta.com"),
            uri("sip:bob@biloxi.com"),
            uri("sip:alice@pc33.atlanta.com"),
            uri("sip:bob@192.0.2.4"),
            314159,
            0,
            vec![],
            false,
        )
    }

    #[test]
    fn peer_swaps_tags_and_direction() {
        let id = DialogId::new("call1", "A", "B", Direction::Uac);
        let peer = id.peer();
        assert_eq!(peer.local_tag, "B");
        assert_eq!(peer.remote_tag, "A");
        assert_eq!(peer.direction, Direction::Uas);
        assert_eq!(id.canonical(), peer.peer().canonical());
    }

    #[test]
    fn in_dialog_request_cseq_strictly_increases() {
        let dialog = make_dialog();
        let first = dialog.build_request(Method::Bye).unwrap();
        let second = dialog.build_request(Method::Info).unwrap();
        let Some(TypedHeader::CSeq(a)) = first.header(&sip_core::types::headers::HeaderName::CSeq) else { panic!() };
        let Some(TypedHeader::CSeq(b)) = second.header(&sip_core::types::headers::HeaderName::CSeq) else { panic!() };
        assert!(b.number > a.number);
        assert_eq!(a.number, 314160);
    }

    #[test]
    fn stray_low_cseq_is_rejected() {
        let dialog = make_dialog();
        dialog.validate_remote_cseq(&Method::Invite, 5).unwrap();
        assert!(dialog.validate_remote_cseq(&Method::Invite, 4).is_err());
        assert!(dialog.validate_remote_cseq(&Method::Invite, 6).is_ok());
    }

    #[test]
    fn ack_never_bumps_remote_seq() {
        let dialog = make_dialog();
        dialog.validate_remote_cseq(&Method::Invite, 10).unwrap();
        dialog.validate_remote_cseq(&Method::Ack, 1).unwrap();
        // remote_seq is still 10 after the ACK, so a retransmitted INVITE
        // carrying the same CSeq number is accepted, not rejected...
        assert!(dialog.validate_remote_cseq(&Method::Invite, 10).is_ok());
        // ...while anything strictly lower still is.
        assert!(dialog.validate_remote_cseq(&Method::Invite, 9).is_err());
    }
}
