//! Loans service - create, fetch, update and delete the loan held by a mobile number.
//!
//! A mobile number holds at most one loan. Loans are created with defaults
//! (home loan, nothing repaid) and addressed by loan number on update.

use std::sync::Arc;

use crate::{
    audit::Auditor,
    error::AppError,
    models::loan::{LoansDto, NewLoan},
    numbers::{NumberGenerator, allocate_unique},
    repositories::LoanRepository,
};

pub struct LoansService {
    repository: Arc<dyn LoanRepository>,
    numbers: Arc<dyn NumberGenerator>,
    auditor: Arc<dyn Auditor>,
}

impl LoansService {
    pub fn new(
        repository: Arc<dyn LoanRepository>,
        numbers: Arc<dyn NumberGenerator>,
        auditor: Arc<dyn Auditor>,
    ) -> Self {
        Self {
            repository,
            numbers,
            auditor,
        }
    }

    /// Open a default home loan for `mobile_number`.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists`: the mobile number already holds a loan
    /// - `Internal`: no free loan number could be generated
    pub async fn create_loan(&self, mobile_number: &str) -> Result<(), AppError> {
        if self
            .repository
            .find_by_mobile_number(mobile_number)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "Loan already registered with given mobileNumber {mobile_number}"
            )));
        }

        let repository = &self.repository;
        let loan_number = allocate_unique(self.numbers.as_ref(), "loan", |n| async move {
            repository
                .find_by_loan_number(&n.to_string())
                .await
                .map(|found| found.is_some())
        })
        .await?;

        let loan = self
            .repository
            .insert(
                &NewLoan::home_loan(mobile_number, loan_number.to_string()),
                &self.auditor.current_actor(),
            )
            .await?;

        tracing::info!(loan_id = loan.loan_id, "Loan created");
        Ok(())
    }

    /// # Errors
    ///
    /// - `NotFound`: the mobile number holds no loan
    pub async fn fetch_loan(&self, mobile_number: &str) -> Result<LoansDto, AppError> {
        let loan = self
            .repository
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| AppError::not_found("Loan", "mobileNumber", mobile_number))?;

        tracing::debug!(loan_id = loan.loan_id, "Loan fetched");
        Ok(loan.into())
    }

    /// Overwrite type, principal and amount paid of the loan with `dto.loan_number`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: amount paid exceeds the loan
    /// - `NotFound`: no loan has that number
    pub async fn update_loan(&self, dto: LoansDto) -> Result<bool, AppError> {
        if dto.amount_paid > dto.total_loan {
            return Err(AppError::InvalidRequest(
                "Amount paid cannot exceed the total loan amount".to_string(),
            ));
        }

        let mut loan = self
            .repository
            .find_by_loan_number(&dto.loan_number)
            .await?
            .ok_or_else(|| AppError::not_found("Loan", "LoanNumber", &dto.loan_number))?;

        loan.apply(&dto);
        self.repository
            .update(&loan, &self.auditor.current_actor())
            .await?;

        tracing::info!(loan_id = loan.loan_id, "Loan updated");
        Ok(true)
    }

    /// # Errors
    ///
    /// - `NotFound`: the mobile number holds no loan
    pub async fn delete_loan(&self, mobile_number: &str) -> Result<bool, AppError> {
        let loan = self
            .repository
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| AppError::not_found("Loan", "mobileNumber", mobile_number))?;

        self.repository.delete(loan.loan_id).await?;

        tracing::info!(loan_id = loan.loan_id, "Loan deleted");
        Ok(true)
    }
}
