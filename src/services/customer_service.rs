//! Customer details - a read-only view merging all three services.
//!
//! The account is required; a customer without a card or loan simply gets no
//! `cardsDto` / `loansDto` section.

use std::sync::Arc;

use crate::{
    error::AppError,
    models::response::CustomerDetailsDto,
    services::{AccountsService, CardsService, LoansService},
};

pub struct CustomerDetailsService {
    accounts: Arc<AccountsService>,
    cards: Arc<CardsService>,
    loans: Arc<LoansService>,
}

/// Treat `NotFound` as an absent section; other failures still propagate.
fn optional<T>(result: Result<T, AppError>) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(AppError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

impl CustomerDetailsService {
    pub fn new(
        accounts: Arc<AccountsService>,
        cards: Arc<CardsService>,
        loans: Arc<LoansService>,
    ) -> Self {
        Self {
            accounts,
            cards,
            loans,
        }
    }

    /// # Errors
    ///
    /// - `NotFound`: the mobile number has no customer or account
    pub async fn fetch_customer_details(
        &self,
        mobile_number: &str,
        correlation_id: &str,
    ) -> Result<CustomerDetailsDto, AppError> {
        tracing::debug!(correlation_id, "Fetching customer details");

        let customer = self.accounts.fetch_account(mobile_number).await?;
        let cards_dto = optional(self.cards.fetch_card(mobile_number).await)?;
        let loans_dto = optional(self.loans.fetch_loan(mobile_number).await)?;

        Ok(CustomerDetailsDto {
            name: customer.name,
            email: customer.email,
            mobile_number: customer.mobile_number,
            accounts_dto: customer.accounts_dto,
            cards_dto,
            loans_dto,
        })
    }
}
