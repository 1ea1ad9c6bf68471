//! The SIP data model: URIs, addresses, the recognized header types, and the
//! request/response message shapes built from them.

pub mod address;
pub mod call_id;
pub mod content_length;
pub mod content_type;
pub mod cseq;
pub mod expires;
pub mod headers;
pub mod max_forwards;
pub mod message;
pub mod method;
pub mod param;
pub mod route;
pub mod status;
pub mod transport;
pub mod uri;
pub mod via;

pub use address::Address;
pub use call_id::CallId;
pub use content_length::ContentLength;
pub use content_type::ContentType;
pub use cseq::CSeq;
pub use expires::Expires;
pub use headers::{Header, HeaderName, HeaderValue, TypedHeader, TypedHeaderTrait};
pub use max_forwards::MaxForwards;
pub use message::{Message, Request, Response, Version};
pub use method::Method;
pub use param::{GenericValue, Param};
pub use route::{RecordRoute, Route};
pub use status::StatusCode;
pub use transport::{Source, TransportKind};
pub use uri::{Host, Scheme, Uri};
pub use via::{SentProtocol, Via, ViaHeader};
