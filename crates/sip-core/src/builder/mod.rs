//! Fluent builders for constructing [`Request`](crate::types::message::Request)s
//! and [`Response`](crate::types::message::Response)s, supplementing the
//! parser with a typed alternative to hand-assembling a `Message` header by
//! header. Used internally by the automatic ACK synthesizer and in-dialog
//! request generation upstream in `sip-dialog-core`, and available directly
//! to applications that construct requests programmatically.

mod request;
mod response;

pub use request::RequestBuilder;
pub use response::ResponseBuilder;

#[cfg(test)]
mod tests;
