//! Customer and account store.
//!
//! A customer and its account are always written together: creation inserts
//! the customer, then the account carrying the generated customer id; update
//! and delete touch both rows. The PostgreSQL store runs each of these pairs
//! inside one database transaction.

use async_trait::async_trait;

use crate::{
    db::DbPool,
    error::AppError,
    models::account::{Account, Customer, NewAccount, NewCustomer},
};

/// Storage contract of the accounts service.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_customer_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<Option<Customer>, AppError>;

    async fn find_customer_by_id(&self, customer_id: i64) -> Result<Option<Customer>, AppError>;

    async fn find_account_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Option<Account>, AppError>;

    async fn find_account_by_number(
        &self,
        account_number: i64,
    ) -> Result<Option<Account>, AppError>;

    /// Insert the customer, then its account, as one unit.
    async fn create_customer_with_account(
        &self,
        customer: &NewCustomer,
        account: &NewAccount,
        actor: &str,
    ) -> Result<(Customer, Account), AppError>;

    /// Persist the mutable fields of both records as one unit.
    async fn update_customer_and_account(
        &self,
        customer: &Customer,
        account: &Account,
        actor: &str,
    ) -> Result<(Customer, Account), AppError>;

    /// Remove the customer's account and then the customer.
    async fn delete_customer(&self, customer_id: i64) -> Result<(), AppError>;
}

const CUSTOMER_COLUMNS: &str =
    "customer_id, name, email, mobile_number, created_at, created_by, updated_at, updated_by";

const ACCOUNT_COLUMNS: &str = "account_number, customer_id, account_type, branch_address, \
     created_at, created_by, updated_at, updated_by";

/// PostgreSQL customer and account store.
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: DbPool,
}

impl PgAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_customer_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE mobile_number = $1"
        ))
        .bind(mobile_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn find_customer_by_id(&self, customer_id: i64) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE customer_id = $1"
        ))
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn find_account_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE customer_id = $1"
        ))
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_account_by_number(
        &self,
        account_number: i64,
    ) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE account_number = $1"
        ))
        .bind(account_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create_customer_with_account(
        &self,
        customer: &NewCustomer,
        account: &NewAccount,
        actor: &str,
    ) -> Result<(Customer, Account), AppError> {
        let conflict = || {
            format!(
                "Customer with mobile number {} already exists.",
                customer.mobile_number
            )
        };

        // Start db transaction; dropping `tx` on an early return rolls it back
        let mut tx = self.pool.begin().await?;

        let saved_customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (name, email, mobile_number, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.mobile_number)
        .bind(actor)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| AppError::from_insert(err, conflict))?;

        // The account row needs the customer id generated above
        let saved_account = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (account_number, customer_id, account_type, branch_address, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.account_number)
        .bind(saved_customer.customer_id)
        .bind(&account.account_type)
        .bind(&account.branch_address)
        .bind(actor)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match AppError::from_insert(err, String::new) {
            // Number clash from a concurrent create
            AppError::AlreadyExists(_) => AppError::Internal(format!(
                "Account number {} is already in use",
                account.account_number
            )),
            other => other,
        })?;

        tx.commit().await?;

        Ok((saved_customer, saved_account))
    }

    async fn update_customer_and_account(
        &self,
        customer: &Customer,
        account: &Account,
        actor: &str,
    ) -> Result<(Customer, Account), AppError> {
        let mut tx = self.pool.begin().await?;

        let saved_account = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE accounts
            SET account_type = $1,
                branch_address = $2,
                updated_at = NOW(),
                updated_by = $3
            WHERE account_number = $4
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(&account.account_type)
        .bind(&account.branch_address)
        .bind(actor)
        .bind(account.account_number)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Account", "AccountNumber", account.account_number))?;

        let saved_customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers
            SET name = $1,
                email = $2,
                updated_at = NOW(),
                updated_by = $3
            WHERE customer_id = $4
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(actor)
        .bind(customer.customer_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Customer", "CustomerID", customer.customer_id))?;

        tx.commit().await?;

        Ok((saved_customer, saved_account))
    }

    async fn delete_customer(&self, customer_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM accounts WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found("Customer", "CustomerID", customer_id));
        }

        tx.commit().await?;

        Ok(())
    }
}
