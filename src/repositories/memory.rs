//! In-memory stores.
//!
//! Used when no `DATABASE_URL` is configured and by the test suites. They
//! mirror the PostgreSQL schema: identifiers come from a per-table counter,
//! owner keys and generated numbers are unique, and creation timestamps are
//! stamped on insert. Locks are never held across an await point.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{AccountRepository, CardRepository, LoanRepository};
use crate::{
    audit::Audit,
    error::AppError,
    models::{
        account::{Account, Customer, NewAccount, NewCustomer},
        card::{Card, NewCard},
        loan::{Loan, NewLoan},
    },
};

/// Rows keyed by a generated identifier.
#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.values().find(|row| predicate(row)).cloned()
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct InMemoryCardRepository {
    cards: RwLock<Table<Card>>,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardRepository for InMemoryCardRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Card>, AppError> {
        Ok(self.cards.read().find(|c| c.mobile_number == mobile_number))
    }

    async fn find_by_card_number(&self, card_number: &str) -> Result<Option<Card>, AppError> {
        Ok(self.cards.read().find(|c| c.card_number == card_number))
    }

    async fn insert(&self, card: &NewCard, actor: &str) -> Result<Card, AppError> {
        let mut table = self.cards.write();
        let taken = table.rows.values().any(|c| {
            c.mobile_number == card.mobile_number || c.card_number == card.card_number
        });
        if taken {
            return Err(AppError::AlreadyExists(format!(
                "Card already registered with given mobileNumber {}",
                card.mobile_number
            )));
        }

        let card_id = table.allocate_id();
        let saved = Card {
            card_id,
            mobile_number: card.mobile_number.clone(),
            card_number: card.card_number.clone(),
            card_type: card.card_type.clone(),
            total_limit: card.total_limit,
            amount_used: card.amount_used,
            available_amount: card.available_amount,
            audit: Audit::created_by(actor),
        };
        table.rows.insert(card_id, saved.clone());

        Ok(saved)
    }

    async fn update(&self, card: &Card, actor: &str) -> Result<Card, AppError> {
        let mut table = self.cards.write();
        let stored = table
            .rows
            .get_mut(&card.card_id)
            .ok_or_else(|| AppError::not_found("Card", "CardNumber", &card.card_number))?;

        stored.card_type = card.card_type.clone();
        stored.total_limit = card.total_limit;
        stored.amount_used = card.amount_used;
        stored.available_amount = card.available_amount;
        stored.audit.touch(actor);

        Ok(stored.clone())
    }

    async fn delete(&self, card_id: i64) -> Result<(), AppError> {
        self.cards
            .write()
            .rows
            .remove(&card_id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Card", "cardId", card_id))
    }
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct InMemoryLoanRepository {
    loans: RwLock<Table<Loan>>,
}

impl InMemoryLoanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoanRepository for InMemoryLoanRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Loan>, AppError> {
        Ok(self.loans.read().find(|l| l.mobile_number == mobile_number))
    }

    async fn find_by_loan_number(&self, loan_number: &str) -> Result<Option<Loan>, AppError> {
        Ok(self.loans.read().find(|l| l.loan_number == loan_number))
    }

    async fn insert(&self, loan: &NewLoan, actor: &str) -> Result<Loan, AppError> {
        let mut table = self.loans.write();
        let taken = table.rows.values().any(|l| {
            l.mobile_number == loan.mobile_number || l.loan_number == loan.loan_number
        });
        if taken {
            return Err(AppError::AlreadyExists(format!(
                "Loan already registered with given mobileNumber {}",
                loan.mobile_number
            )));
        }

        let loan_id = table.allocate_id();
        let saved = Loan {
            loan_id,
            mobile_number: loan.mobile_number.clone(),
            loan_number: loan.loan_number.clone(),
            loan_type: loan.loan_type.clone(),
            total_loan: loan.total_loan,
            amount_paid: loan.amount_paid,
            outstanding_amount: loan.outstanding_amount,
            audit: Audit::created_by(actor),
        };
        table.rows.insert(loan_id, saved.clone());

        Ok(saved)
    }

    async fn update(&self, loan: &Loan, actor: &str) -> Result<Loan, AppError> {
        let mut table = self.loans.write();
        let stored = table
            .rows
            .get_mut(&loan.loan_id)
            .ok_or_else(|| AppError::not_found("Loan", "LoanNumber", &loan.loan_number))?;

        stored.loan_type = loan.loan_type.clone();
        stored.total_loan = loan.total_loan;
        stored.amount_paid = loan.amount_paid;
        stored.outstanding_amount = loan.outstanding_amount;
        stored.audit.touch(actor);

        Ok(stored.clone())
    }

    async fn delete(&self, loan_id: i64) -> Result<(), AppError> {
        self.loans
            .write()
            .rows
            .remove(&loan_id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Loan", "loanId", loan_id))
    }
}

// ---------------------------------------------------------------------------
// Customers and accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct AccountTables {
    customers: Table<Customer>,
    /// Keyed by account number
    accounts: BTreeMap<i64, Account>,
}

/// Both tables sit behind one lock so paired writes are atomic.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    tables: RwLock<AccountTables>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_customer_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<Option<Customer>, AppError> {
        Ok(self
            .tables
            .read()
            .customers
            .find(|c| c.mobile_number == mobile_number))
    }

    async fn find_customer_by_id(&self, customer_id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self.tables.read().customers.rows.get(&customer_id).cloned())
    }

    async fn find_account_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Option<Account>, AppError> {
        Ok(self
            .tables
            .read()
            .accounts
            .values()
            .find(|a| a.customer_id == customer_id)
            .cloned())
    }

    async fn find_account_by_number(
        &self,
        account_number: i64,
    ) -> Result<Option<Account>, AppError> {
        Ok(self.tables.read().accounts.get(&account_number).cloned())
    }

    async fn create_customer_with_account(
        &self,
        customer: &NewCustomer,
        account: &NewAccount,
        actor: &str,
    ) -> Result<(Customer, Account), AppError> {
        let mut tables = self.tables.write();

        let taken = tables
            .customers
            .rows
            .values()
            .any(|c| c.mobile_number == customer.mobile_number);
        if taken {
            return Err(AppError::AlreadyExists(format!(
                "Customer with mobile number {} already exists.",
                customer.mobile_number
            )));
        }
        if tables.accounts.contains_key(&account.account_number) {
            return Err(AppError::Internal(format!(
                "Account number {} is already in use",
                account.account_number
            )));
        }

        let customer_id = tables.customers.allocate_id();
        let saved_customer = Customer {
            customer_id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            mobile_number: customer.mobile_number.clone(),
            audit: Audit::created_by(actor),
        };
        let saved_account = Account {
            account_number: account.account_number,
            customer_id,
            account_type: account.account_type.clone(),
            branch_address: account.branch_address.clone(),
            audit: Audit::created_by(actor),
        };

        tables
            .customers
            .rows
            .insert(customer_id, saved_customer.clone());
        tables
            .accounts
            .insert(account.account_number, saved_account.clone());

        Ok((saved_customer, saved_account))
    }

    async fn update_customer_and_account(
        &self,
        customer: &Customer,
        account: &Account,
        actor: &str,
    ) -> Result<(Customer, Account), AppError> {
        let mut tables = self.tables.write();

        // Check both rows before touching either one
        if !tables.accounts.contains_key(&account.account_number) {
            return Err(AppError::not_found(
                "Account",
                "AccountNumber",
                account.account_number,
            ));
        }
        if !tables.customers.rows.contains_key(&customer.customer_id) {
            return Err(AppError::not_found(
                "Customer",
                "CustomerID",
                customer.customer_id,
            ));
        }

        let saved_account = tables
            .accounts
            .get_mut(&account.account_number)
            .map(|stored| {
                stored.account_type = account.account_type.clone();
                stored.branch_address = account.branch_address.clone();
                stored.audit.touch(actor);
                stored.clone()
            })
            .ok_or_else(|| AppError::Internal("account row vanished under write lock".into()))?;

        let saved_customer = tables
            .customers
            .rows
            .get_mut(&customer.customer_id)
            .map(|stored| {
                stored.name = customer.name.clone();
                stored.email = customer.email.clone();
                stored.audit.touch(actor);
                stored.clone()
            })
            .ok_or_else(|| AppError::Internal("customer row vanished under write lock".into()))?;

        Ok((saved_customer, saved_account))
    }

    async fn delete_customer(&self, customer_id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.write();

        if tables.customers.rows.remove(&customer_id).is_none() {
            return Err(AppError::not_found("Customer", "CustomerID", customer_id));
        }
        tables.accounts.retain(|_, a| a.customer_id != customer_id);

        Ok(())
    }
}
