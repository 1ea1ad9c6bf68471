//! The `Route` and `Record-Route` headers (RFC 3261 Sections 20.34/20.30): an
//! ordered list of addresses describing the proxy path a request must traverse.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::address::Address;
use crate::types::headers::header::Header;
use crate::types::headers::header_name::HeaderName;
use crate::types::headers::header_value::HeaderValue;
use crate::types::headers::typed_header::TypedHeaderTrait;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route(pub Vec<Address>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRoute(pub Vec<Address>);

macro_rules! impl_route_like {
    ($ty:ident, $name_variant:expr) => {
        impl $ty {
            pub fn new(entries: Vec<Address>) -> Self {
                $ty(entries)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, Address> {
                self.0.iter()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(", "))
            }
        }

        impl TypedHeaderTrait for $ty {
            type Name = HeaderName;

            fn header_name() -> Self::Name {
                $name_variant
            }

            fn to_header(&self) -> Header {
                Header::new(Self::header_name(), HeaderValue::Addresses(self.0.clone()))
            }

            fn from_header(header: &Header) -> Result<Self> {
                match &header.value {
                    HeaderValue::Addresses(addrs) => Ok($ty(addrs.clone())),
                    HeaderValue::Address(addr) => Ok($ty(vec![addr.clone()])),
                    HeaderValue::Raw(bytes) => {
                        let s = String::from_utf8_lossy(bytes);
                        crate::parser::headers::parse_address_list(s.as_bytes())
                            .map(|(_, addrs)| $ty(addrs))
                            .map_err(|e| Error::InvalidHeader(format!("invalid {} value: {:?}", stringify!($ty), e)))
                    }
                    other => Err(Error::InvalidHeader(format!("unexpected value for {}: {:?}", stringify!($ty), other))),
                }
            }
        }
    };
}

impl_route_like!(Route, HeaderName::Route);
impl_route_like!(RecordRoute, HeaderName::RecordRoute);
