//! The error taxonomy this crate surfaces above `sip_core`/`sip_transport`.
//!
//! Inbound parse failures never reach this layer as errors to propagate —
//! the demux drops them with a logged warning before a transaction exists.
//! [`ParseError`] is kept here only as the alias outbound/programming-error
//! paths use (`sip_core::Error` is returned, e.g., from in-dialog request
//! construction given a malformed stored URI).

/// Re-exported rather than wrapped: parse errors belong to the codec layer
/// and this crate never adds context to them.
pub type ParseError = sip_core::Error;

#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("transaction timed out")]
    Timeout,

    #[error("transport error")]
    Transport(#[from] sip_transport::Error),

    #[error("transaction already exists for this key")]
    AlreadyStarted,

    #[error("operation attempted in state {current}: {attempted}")]
    UnexpectedState { current: &'static str, attempted: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("no dialog matches {0}")]
    NotFound(String),

    #[error("sequence violation: CSeq {actual} is not greater than {expected}")]
    SequenceViolation { expected: u32, actual: u32 },

    #[error("dialog is terminated")]
    Terminated,
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("method not allowed")]
    MethodNotAllowed { allow: Vec<sip_core::types::method::Method> },

    #[error("bad extension: {0}")]
    BadExtension(String),
}
