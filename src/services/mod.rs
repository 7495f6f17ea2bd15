//! Business logic services.
//!
//! Services contain the domain logic separated from HTTP handlers. Each one
//! owns its repository, number generator and auditor; none reaches into
//! another service's store.

pub mod accounts_service;
pub mod cards_service;
pub mod customer_service;
pub mod loans_service;

pub use accounts_service::AccountsService;
pub use cards_service::CardsService;
pub use customer_service::CustomerDetailsService;
pub use loans_service::LoansService;
