//! # sip-dialog-core
//!
//! L3/L4 of the signaling stack: the four RFC 3261 §17 transaction state
//! machines, the §12 dialog lifecycle built on top of them, and the
//! [`engine::SipCore`] that wires both to a [`sip_transport::Transport`]
//! and an application's [`handler::UasHandler`]/[`handler::UacHandler`].
//!
//! `sip-core` knows only how to read and write bytes; `sip-transport` knows
//! only how to demultiplex a datagram to *some* sink. This crate is where
//! "which transaction does this inbound message belong to" and "what is
//! the current state of this call" actually get answered.
//!
//! [`SipCore`] sends *through* the same [`sip_transport::Transport`] it is
//! also the inbound sink *for*, so construction is two-phase: bind the
//! transport unattached, build the core around it, then attach the core as
//! the transport's sink.
//!
//! ```no_run
//! use std::net::SocketAddr;
//! use std::sync::Arc;
//! use sip_dialog_core::prelude::*;
//! use sip_transport::{SystemResolver, UdpTransport};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! struct App;
//! #[async_trait::async_trait]
//! impl UasHandler for App {}
//! #[async_trait::async_trait]
//! impl UacHandler for App {}
//!
//! let addr: SocketAddr = "0.0.0.0:5060".parse()?;
//! let transport = Arc::new(UdpTransport::bind_unattached(addr).await?);
//! let core = SipCore::new(transport.clone(), Arc::new(SystemResolver), TimerProfile::default(), Arc::new(App), Arc::new(App));
//! transport.attach(core);
//! # Ok(())
//! # }
//! ```

pub mod dialog;
pub mod engine;
pub mod error;
pub mod handler;
pub mod registry;
pub mod timer;
pub mod transaction;

pub use dialog::{Dialog, DialogId, DialogLifecycle, Direction};
pub use engine::{EngineError, SipCore};
pub use error::{DialogError, ProtocolError, TransactionError};
pub use handler::{TransactionResult, UacAction, UacHandler, UasAction, UasHandler};
pub use registry::{DialogRegistry, TransactionRegistry};
pub use timer::TimerProfile;
pub use transaction::{ClientTransaction, Role, ServerTransaction, Transaction, TransactionId, TransactionKey, TransactionKind};

/// Common imports for building on this crate.
pub mod prelude {
    pub use crate::dialog::{Dialog, DialogId, DialogLifecycle, Direction};
    pub use crate::engine::{EngineError, SipCore};
    pub use crate::error::{DialogError, ProtocolError, TransactionError};
    pub use crate::handler::{TransactionResult, UacAction, UacHandler, UasAction, UasHandler};
    pub use crate::registry::{DialogRegistry, TransactionRegistry};
    pub use crate::timer::TimerProfile;
    pub use crate::transaction::{ClientTransaction, Role, ServerTransaction, Transaction, TransactionId, TransactionKey, TransactionKind};
}
