//! The `nom`-based SIP message parser (RFC 3261 §25 grammar), organized by
//! grammar layer: low-level character classes, separators and whitespace
//! rules shared by every higher parser, then URI, header-value, and
//! top-level message parsers built on top of them.

pub mod common_chars;
pub mod headers;
pub mod message;
pub mod response;
pub mod separators;
pub mod uri;
pub mod utf8;
pub mod utils;
pub mod whitespace;

pub type ParseResult<'a, O> = nom::IResult<&'a [u8], O>;

pub use message::{dialog_id, parse_message, parse_message_with_mode, transaction_id, ParseMode};
pub use headers::parse_address;
