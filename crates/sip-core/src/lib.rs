//! # sip-core
//!
//! RFC 3261 SIP message codec: the `Message` data model, a `nom`-based
//! parser, and a serializer that writes a `Message` back to wire bytes.
//!
//! This crate is the L1 layer of the sipstack-core signaling stack: it has
//! no knowledge of transactions, dialogs, or sockets. Those live in
//! `sip-transport` (L2) and `sip-dialog-core` (L3/L4).
//!
//! ## Parsing
//!
//! ```rust
//! use sip_core::prelude::*;
//!
//! let data = b"INVITE sip:bob@example.com SIP/2.0\r\n\
//! Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds\r\n\
//! Max-Forwards: 70\r\n\
//! To: Bob <sip:bob@example.com>\r\n\
//! From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
//! Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n\
//! CSeq: 314159 INVITE\r\n\
//! Content-Length: 0\r\n\r\n";
//!
//! let message = parse_message(data).expect("valid SIP message");
//! assert!(message.is_request());
//! ```
//!
//! ## Serializing
//!
//! ```rust
//! use sip_core::prelude::*;
//!
//! let request = RequestBuilder::invite("sip:bob@example.com")
//!     .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
//!     .to("Bob", "sip:bob@example.com", None)
//!     .call_id("a84b4c76e66710@pc33.atlanta.com")
//!     .cseq(314159)
//!     .build();
//!
//! let bytes = serialize_request(&request, &SerializeContext::udp("pc33.atlanta.com", 5060));
//! assert!(bytes.starts_with(b"INVITE sip:bob@example.com SIP/2.0\r\n"));
//! ```

pub mod builder;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod types;

/// Common imports for working with this crate: the message types, the
/// parser/serializer entry points, and the builders.
pub mod prelude {
    pub use crate::builder::{RequestBuilder, ResponseBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::parser::message::{parse_message, parse_message_with_mode, ParseMode};
    pub use crate::parser::{dialog_id, transaction_id};
    pub use crate::serializer::{serialize_request, serialize_response, SerializeContext};
    pub use crate::types::{
        Address, CSeq, CallId, ContentLength, ContentType, Header, HeaderName, HeaderValue,
        Host, MaxForwards, Message, Method, Param, RecordRoute, Request, Response, Route, Scheme,
        SentProtocol, Source, StatusCode, TransportKind, TypedHeader, TypedHeaderTrait, Uri, Via,
        ViaHeader,
    };
}

pub use error::{Error, Result};
pub use parser::message::{parse_message, parse_message_with_mode, ParseMode};
pub use serializer::{serialize_request, serialize_response, SerializeContext};
pub use types::headers::{Header, HeaderName, HeaderValue, TypedHeader, TypedHeaderTrait};
pub use types::message::{Message, Request, Response, Version};
pub use types::method::Method;
pub use types::status::StatusCode;
pub use types::uri::{Host, Scheme, Uri};
pub use types::via::Via;
