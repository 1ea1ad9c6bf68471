//! Strongly-typed access to the headers this stack recognizes.
//!
//! Every recognized header type implements [`TypedHeaderTrait`], which gives it
//! a uniform way to round-trip through the generic [`Header`] representation
//! parsing produces. [`TypedHeader`] is the closed sum of those types plus a
//! catch-all for everything else.

use std::fmt;

use crate::error::Result;
use crate::types::address::Address;
use crate::types::call_id::CallId;
use crate::types::content_length::ContentLength;
use crate::types::content_type::ContentType;
use crate::types::cseq::CSeq;
use crate::types::expires::Expires;
use crate::types::headers::header::Header;
use crate::types::headers::header_name::HeaderName;
use crate::types::max_forwards::MaxForwards;
use crate::types::route::{RecordRoute, Route};
use crate::types::via::Via;

/// Converts a header type to and from the generic [`Header`] representation.
pub trait TypedHeaderTrait: Sized {
    type Name;

    fn header_name() -> Self::Name;
    fn to_header(&self) -> Header;
    fn from_header(header: &Header) -> Result<Self>;
}

/// A header parsed into its strongly-typed form, or `Other` for anything this
/// stack doesn't give a dedicated representation to.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedHeader {
    Via(Via),
    From(Address),
    To(Address),
    Contact(Vec<Address>),
    CallId(CallId),
    CSeq(CSeq),
    MaxForwards(MaxForwards),
    ContentLength(ContentLength),
    ContentType(ContentType),
    Expires(Expires),
    Route(Route),
    RecordRoute(RecordRoute),
    Other(Header),
}

impl TypedHeader {
    pub fn name(&self) -> HeaderName {
        match self {
            TypedHeader::Via(_) => HeaderName::Via,
            TypedHeader::From(_) => HeaderName::From,
            TypedHeader::To(_) => HeaderName::To,
            TypedHeader::Contact(_) => HeaderName::Contact,
            TypedHeader::CallId(_) => HeaderName::CallId,
            TypedHeader::CSeq(_) => HeaderName::CSeq,
            TypedHeader::MaxForwards(_) => HeaderName::MaxForwards,
            TypedHeader::ContentLength(_) => HeaderName::ContentLength,
            TypedHeader::ContentType(_) => HeaderName::ContentType,
            TypedHeader::Expires(_) => HeaderName::Expires,
            TypedHeader::Route(_) => HeaderName::Route,
            TypedHeader::RecordRoute(_) => HeaderName::RecordRoute,
            TypedHeader::Other(h) => h.name.clone(),
        }
    }

    pub fn to_header(&self) -> Header {
        use crate::types::headers::header_value::HeaderValue;
        match self {
            TypedHeader::Via(v) => v.to_header(),
            TypedHeader::From(a) => Header::new(HeaderName::From, HeaderValue::Address(a.clone())),
            TypedHeader::To(a) => Header::new(HeaderName::To, HeaderValue::Address(a.clone())),
            TypedHeader::Contact(addrs) => Header::new(HeaderName::Contact, HeaderValue::Addresses(addrs.clone())),
            TypedHeader::CallId(c) => c.to_header(),
            TypedHeader::CSeq(c) => c.to_header(),
            TypedHeader::MaxForwards(m) => m.to_header(),
            TypedHeader::ContentLength(c) => c.to_header(),
            TypedHeader::ContentType(c) => c.to_header(),
            TypedHeader::Expires(e) => e.to_header(),
            TypedHeader::Route(r) => r.to_header(),
            TypedHeader::RecordRoute(r) => r.to_header(),
            TypedHeader::Other(h) => h.clone(),
        }
    }

    /// Converts a generic [`Header`] into its typed form where one is known,
    /// otherwise wraps it unchanged as `Other`.
    pub fn from_header(header: Header) -> Self {
        let typed = match &header.name {
            HeaderName::Via => Via::from_header(&header).ok().map(TypedHeader::Via),
            HeaderName::From => address_from(&header).map(TypedHeader::From),
            HeaderName::To => address_from(&header).map(TypedHeader::To),
            HeaderName::Contact => addresses_from(&header).map(TypedHeader::Contact),
            HeaderName::CallId => CallId::from_header(&header).ok().map(TypedHeader::CallId),
            HeaderName::CSeq => CSeq::from_header(&header).ok().map(TypedHeader::CSeq),
            HeaderName::MaxForwards => MaxForwards::from_header(&header).ok().map(TypedHeader::MaxForwards),
            HeaderName::ContentLength => ContentLength::from_header(&header).ok().map(TypedHeader::ContentLength),
            HeaderName::ContentType => ContentType::from_header(&header).ok().map(TypedHeader::ContentType),
            HeaderName::Expires => Expires::from_header(&header).ok().map(TypedHeader::Expires),
            HeaderName::Route => Route::from_header(&header).ok().map(TypedHeader::Route),
            HeaderName::RecordRoute => RecordRoute::from_header(&header).ok().map(TypedHeader::RecordRoute),
            HeaderName::Other(_) => None,
        };
        typed.unwrap_or(TypedHeader::Other(header))
    }
}

fn address_from(header: &Header) -> Option<Address> {
    use crate::types::headers::header_value::HeaderValue;
    match &header.value {
        HeaderValue::Address(a) => Some(a.clone()),
        HeaderValue::Addresses(addrs) => addrs.first().cloned(),
        HeaderValue::Raw(bytes) => crate::parser::headers::parse_address(bytes).ok().map(|(_, a)| a),
        _ => None,
    }
}

fn addresses_from(header: &Header) -> Option<Vec<Address>> {
    use crate::types::headers::header_value::HeaderValue;
    match &header.value {
        HeaderValue::Addresses(addrs) => Some(addrs.clone()),
        HeaderValue::Address(a) => Some(vec![a.clone()]),
        HeaderValue::Raw(bytes) => crate::parser::headers::parse_address_list(bytes).ok().map(|(_, a)| a),
        _ => None,
    }
}

impl fmt::Display for TypedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_header())
    }
}
