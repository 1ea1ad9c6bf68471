//! A fluent builder for [`Response`]s.

use bytes::Bytes;

use crate::types::address::Address;
use crate::types::call_id::CallId;
use crate::types::content_type::ContentType;
use crate::types::cseq::CSeq;
use crate::types::headers::TypedHeader;
use crate::types::message::Response;
use crate::types::method::Method;
use crate::types::param::Param;
use crate::types::status::StatusCode;
use crate::types::uri::Uri;

/// Builds a [`Response`] header by header.
///
/// ```rust
/// use sip_core::builder::ResponseBuilder;
/// use sip_core::types::status::StatusCode;
/// use sip_core::types::method::Method;
///
/// let response = ResponseBuilder::new(StatusCode::Ok, None)
///     .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
///     .to("Bob", "sip:bob@example.com", Some("a6c85cf"))
///     .call_id("a84b4c76e66710@pc33.atlanta.com")
///     .cseq(314159, Method::Invite)
///     .build();
///
/// assert_eq!(response.status_code, StatusCode::Ok);
/// ```
pub struct ResponseBuilder {
    status_code: StatusCode,
    reason: Option<String>,
    headers: Vec<TypedHeader>,
    body: Bytes,
}

impl ResponseBuilder {
    pub fn new(status_code: StatusCode, reason: Option<&str>) -> Self {
        ResponseBuilder { status_code, reason: reason.map(str::to_string), headers: Vec::new(), body: Bytes::new() }
    }

    pub fn trying() -> Self {
        ResponseBuilder::new(StatusCode::Trying, None)
    }

    pub fn ringing() -> Self {
        ResponseBuilder::new(StatusCode::Ringing, None)
    }

    pub fn ok() -> Self {
        ResponseBuilder::new(StatusCode::Ok, None)
    }

    pub fn from(mut self, display_name: &str, uri: &str, tag: Option<&str>) -> Self {
        let uri: Uri = uri.parse().expect("valid From URI");
        let mut addr = Address::new(uri);
        if !display_name.is_empty() {
            addr = addr.with_display_name(display_name);
        }
        if let Some(tag) = tag {
            addr = addr.with_param(Param::tag(tag));
        }
        self.headers.push(TypedHeader::From(addr));
        self
    }

    pub fn to(mut self, display_name: &str, uri: &str, tag: Option<&str>) -> Self {
        let uri: Uri = uri.parse().expect("valid To URI");
        let mut addr = Address::new(uri);
        if !display_name.is_empty() {
            addr = addr.with_display_name(display_name);
        }
        if let Some(tag) = tag {
            addr = addr.with_param(Param::tag(tag));
        }
        self.headers.push(TypedHeader::To(addr));
        self
    }

    pub fn call_id(mut self, call_id: impl Into<String>) -> Self {
        self.headers.push(TypedHeader::CallId(CallId::new(call_id)));
        self
    }

    pub fn cseq(mut self, number: u32, method: Method) -> Self {
        self.headers.push(TypedHeader::CSeq(CSeq::new(number, method)));
        self
    }

    pub fn via(mut self, via: crate::types::via::Via) -> Self {
        self.headers.push(TypedHeader::Via(via));
        self
    }

    pub fn contact(mut self, uri: &str) -> Self {
        let uri: Uri = uri.parse().expect("valid Contact URI");
        self.headers.push(TypedHeader::Contact(vec![Address::new(uri)]));
        self
    }

    pub fn content_type(mut self, mime_type: impl Into<String>) -> Self {
        self.headers.push(TypedHeader::ContentType(ContentType::new(mime_type)));
        self
    }

    pub fn header(mut self, header: TypedHeader) -> Self {
        self.headers.push(header);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        let mut response = Response::new(self.status_code);
        if let Some(reason) = self.reason {
            response = response.with_reason(reason);
        }
        for header in self.headers {
            response = response.with_header(header);
        }
        response.with_body(self.body)
    }
}
