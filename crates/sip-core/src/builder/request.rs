//! A fluent builder for [`Request`]s.

use bytes::Bytes;

use crate::types::address::Address;
use crate::types::call_id::CallId;
use crate::types::content_type::ContentType;
use crate::types::cseq::CSeq;
use crate::types::headers::TypedHeader;
use crate::types::max_forwards::MaxForwards;
use crate::types::message::Request;
use crate::types::method::Method;
use crate::types::param::Param;
use crate::types::uri::Uri;

/// Builds a [`Request`] header by header.
///
/// ```rust
/// use sip_core::builder::RequestBuilder;
///
/// let request = RequestBuilder::invite("sip:bob@example.com")
///     .from("Alice", "sip:alice@atlanta.com", Some("1928301774"))
///     .to("Bob", "sip:bob@example.com", None)
///     .call_id("a84b4c76e66710@pc33.atlanta.com")
///     .cseq(314159)
///     .build();
///
/// assert_eq!(request.method.to_string(), "INVITE");
/// ```
pub struct RequestBuilder {
    method: Method,
    uri: Uri,
    headers: Vec<TypedHeader>,
    body: Bytes,
}

impl RequestBuilder {
    pub fn new(method: Method, uri: Uri) -> Self {
        RequestBuilder { method, uri, headers: Vec::new(), body: Bytes::new() }
    }

    pub fn invite(uri: &str) -> Self {
        RequestBuilder::from_str(Method::Invite, uri)
    }

    pub fn ack(uri: &str) -> Self {
        RequestBuilder::from_str(Method::Ack, uri)
    }

    pub fn bye(uri: &str) -> Self {
        RequestBuilder::from_str(Method::Bye, uri)
    }

    pub fn cancel(uri: &str) -> Self {
        RequestBuilder::from_str(Method::Cancel, uri)
    }

    pub fn register(uri: &str) -> Self {
        RequestBuilder::from_str(Method::Register, uri)
    }

    fn from_str(method: Method, uri: &str) -> Self {
        let uri: Uri = uri.parse().expect("valid request URI");
        RequestBuilder { method, uri, headers: Vec::new(), body: Bytes::new() }
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

    pub fn cseq(mut self, number: u32) -> Self {
        let method = self.method.clone();
        self.headers.push(TypedHeader::CSeq(CSeq::new(number, method)));
        self
    }

    pub fn via(mut self, via: crate::types::via::Via) -> Self {
        self.headers.push(TypedHeader::Via(via));
        self
    }

    pub fn max_forwards(mut self, hops: u8) -> Self {
        self.headers.push(TypedHeader::MaxForwards(MaxForwards(hops)));
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

    pub fn build(self) -> Request {
        let mut request = Request::new(self.method, self.uri);
        for header in self.headers {
            request = request.with_header(header);
        }
        request.with_body(self.body)
    }
}
