//! Data models representing database entities and API payloads.
//!
//! Entities map to database tables; `*Dto` types are the JSON shapes
//! exchanged with clients.

/// Customer and account models (accounts service)
pub mod account;
/// Card models (cards service)
pub mod card;
/// Loan models (loans service)
pub mod loan;
/// Query parameter types
pub mod request;
/// Response envelopes shared by every service
pub mod response;
/// Field validators shared by the request types
pub mod validation;
