//! Loan store.

use async_trait::async_trait;

use crate::{
    db::DbPool,
    error::AppError,
    models::loan::{Loan, NewLoan},
};

/// Storage contract of the loans service.
#[async_trait]
pub trait LoanRepository: Send + Sync {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Loan>, AppError>;

    async fn find_by_loan_number(&self, loan_number: &str) -> Result<Option<Loan>, AppError>;

    /// Insert a loan, stamping `actor` as creator.
    ///
    /// Fails with `AlreadyExists` if the mobile number or loan number is taken.
    async fn insert(&self, loan: &NewLoan, actor: &str) -> Result<Loan, AppError>;

    /// Persist the mutable fields of `loan`, stamping `actor` as modifier.
    async fn update(&self, loan: &Loan, actor: &str) -> Result<Loan, AppError>;

    async fn delete(&self, loan_id: i64) -> Result<(), AppError>;
}

const LOAN_COLUMNS: &str = "loan_id, mobile_number, loan_number, loan_type, total_loan, \
     amount_paid, outstanding_amount, created_at, created_by, updated_at, updated_by";

/// PostgreSQL loan store.
#[derive(Clone)]
pub struct PgLoanRepository {
    pool: DbPool,
}

impl PgLoanRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanRepository for PgLoanRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Loan>, AppError> {
        let loan = sqlx::query_as::<_, Loan>(&format!(
            "SELECT {LOAN_COLUMNS} FROM loans WHERE mobile_number = $1"
        ))
        .bind(mobile_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(loan)
    }

    async fn find_by_loan_number(&self, loan_number: &str) -> Result<Option<Loan>, AppError> {
        let loan = sqlx::query_as::<_, Loan>(&format!(
            "SELECT {LOAN_COLUMNS} FROM loans WHERE loan_number = $1"
        ))
        .bind(loan_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(loan)
    }

    async fn insert(&self, loan: &NewLoan, actor: &str) -> Result<Loan, AppError> {
        sqlx::query_as::<_, Loan>(&format!(
            r#"
            INSERT INTO loans (
                mobile_number, loan_number, loan_type,
                total_loan, amount_paid, outstanding_amount, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {LOAN_COLUMNS}
            "#
        ))
        .bind(&loan.mobile_number)
        .bind(&loan.loan_number)
        .bind(&loan.loan_type)
        .bind(loan.total_loan)
        .bind(loan.amount_paid)
        .bind(loan.outstanding_amount)
        .bind(actor)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            AppError::from_insert(err, || {
                format!(
                    "Loan already registered with given mobileNumber {}",
                    loan.mobile_number
                )
            })
        })
    }

    async fn update(&self, loan: &Loan, actor: &str) -> Result<Loan, AppError> {
        sqlx::query_as::<_, Loan>(&format!(
            r#"
            UPDATE loans
            SET loan_type = $1,
                total_loan = $2,
                amount_paid = $3,
                outstanding_amount = $4,
                updated_at = NOW(),
                updated_by = $5
            WHERE loan_id = $6
            RETURNING {LOAN_COLUMNS}
            "#
        ))
        .bind(&loan.loan_type)
        .bind(loan.total_loan)
        .bind(loan.amount_paid)
        .bind(loan.outstanding_amount)
        .bind(actor)
        .bind(loan.loan_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Loan", "LoanNumber", &loan.loan_number))
    }

    async fn delete(&self, loan_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM loans WHERE loan_id = $1")
            .bind(loan_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Loan", "loanId", loan_id));
        }

        Ok(())
    }
}
