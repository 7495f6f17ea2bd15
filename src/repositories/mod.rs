//! Record stores behind the domain services.
//!
//! Each service talks to its store through a trait so the same domain logic
//! runs against PostgreSQL or against the in-memory stores in [`memory`].
//!
//! - [`AccountRepository`] - customers and their accounts
//! - [`CardRepository`] - cards
//! - [`LoanRepository`] - loans

pub mod accounts;
pub mod cards;
pub mod loans;
pub mod memory;

pub use accounts::{AccountRepository, PgAccountRepository};
pub use cards::{CardRepository, PgCardRepository};
pub use loans::{LoanRepository, PgLoanRepository};
pub use memory::{InMemoryAccountRepository, InMemoryCardRepository, InMemoryLoanRepository};
