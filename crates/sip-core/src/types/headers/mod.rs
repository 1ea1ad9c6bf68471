//! The generic header representation: [`HeaderName`], [`HeaderValue`], [`Header`],
//! and the [`TypedHeader`]/[`TypedHeaderTrait`] machinery built on top of them.

pub mod header;
pub mod header_name;
pub mod header_value;
pub mod typed_header;

pub use header::Header;
pub use header_name::HeaderName;
pub use header_value::HeaderValue;
pub use typed_header::{TypedHeader, TypedHeaderTrait};
