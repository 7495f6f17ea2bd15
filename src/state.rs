//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{
    audit::{ACCOUNTS_ACTOR, CARDS_ACTOR, FixedAuditor, LOANS_ACTOR},
    config::Config,
    db::DbPool,
    numbers::RandomNumberGenerator,
    repositories::{
        AccountRepository, CardRepository, InMemoryAccountRepository, InMemoryCardRepository,
        InMemoryLoanRepository, LoanRepository, PgAccountRepository, PgCardRepository,
        PgLoanRepository,
    },
    services::{AccountsService, CardsService, CustomerDetailsService, LoansService},
};

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountsService>,
    pub cards: Arc<CardsService>,
    pub loans: Arc<LoansService>,
    pub customers: Arc<CustomerDetailsService>,
    pub config: Arc<Config>,
    /// `None` when running on in-memory stores
    pub pool: Option<DbPool>,
}

impl AppState {
    /// Services backed by PostgreSQL.
    pub fn postgres(pool: DbPool, config: Config) -> Self {
        Self::assemble(
            Arc::new(PgAccountRepository::new(pool.clone())),
            Arc::new(PgCardRepository::new(pool.clone())),
            Arc::new(PgLoanRepository::new(pool.clone())),
            config,
            Some(pool),
        )
    }

    /// Services backed by fresh, empty in-memory stores.
    pub fn in_memory(config: Config) -> Self {
        Self::assemble(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemoryCardRepository::new()),
            Arc::new(InMemoryLoanRepository::new()),
            config,
            None,
        )
    }

    fn assemble(
        account_repository: Arc<dyn AccountRepository>,
        card_repository: Arc<dyn CardRepository>,
        loan_repository: Arc<dyn LoanRepository>,
        config: Config,
        pool: Option<DbPool>,
    ) -> Self {
        let accounts = Arc::new(AccountsService::new(
            account_repository,
            Arc::new(RandomNumberGenerator::account_numbers()),
            Arc::new(FixedAuditor::new(ACCOUNTS_ACTOR)),
        ));
        let cards = Arc::new(CardsService::new(
            card_repository,
            Arc::new(RandomNumberGenerator::card_numbers()),
            Arc::new(FixedAuditor::new(CARDS_ACTOR)),
        ));
        let loans = Arc::new(LoansService::new(
            loan_repository,
            Arc::new(RandomNumberGenerator::loan_numbers()),
            Arc::new(FixedAuditor::new(LOANS_ACTOR)),
        ));
        let customers = Arc::new(CustomerDetailsService::new(
            accounts.clone(),
            cards.clone(),
            loans.clone(),
        ));

        Self {
            accounts,
            cards,
            loans,
            customers,
            config: Arc::new(config),
            pool,
        }
    }
}
