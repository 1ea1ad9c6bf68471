//! Client-side transaction FSMs: INVITE (RFC 3261 §17.1.1) and non-INVITE
//! (§17.1.2). Split into two modules because the two share no state
//! machine code — only the [`super::TransactionKey`]/[`super::ClientTransaction`]
//! shapes they're addressed and driven through.

pub mod invite;
pub mod non_invite;
