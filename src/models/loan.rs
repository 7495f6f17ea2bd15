//! Loan data models and API request/response types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::{validate_loan_number, validate_mobile_number};
use crate::audit::Audit;

/// Loan type given to every new loan.
pub const HOME_LOAN: &str = "Home Loan";

/// Principal given to every new loan.
pub const NEW_LOAN_LIMIT: i64 = 100_000;

/// Represents a loan record from the database.
///
/// Maps to the `loans` table. Always `amount_paid <= total_loan`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Loan {
    pub loan_id: i64,
    pub mobile_number: String,
    pub loan_number: String,
    pub loan_type: String,
    pub total_loan: i64,
    pub amount_paid: i64,
    pub outstanding_amount: i64,
    #[sqlx(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone)]
pub struct NewLoan {
    pub mobile_number: String,
    pub loan_number: String,
    pub loan_type: String,
    pub total_loan: i64,
    pub amount_paid: i64,
    pub outstanding_amount: i64,
}

impl NewLoan {
    /// Default home loan, nothing repaid yet.
    pub fn home_loan(mobile_number: &str, loan_number: String) -> Self {
        Self {
            mobile_number: mobile_number.to_string(),
            loan_number,
            loan_type: HOME_LOAN.to_string(),
            total_loan: NEW_LOAN_LIMIT,
            amount_paid: 0,
            outstanding_amount: NEW_LOAN_LIMIT,
        }
    }
}

/// Request and response body of the loans service.
///
/// `outstandingAmount` is derived on write; client values are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoansDto {
    #[validate(custom(function = "validate_mobile_number"))]
    pub mobile_number: String,

    #[validate(custom(function = "validate_loan_number"))]
    pub loan_number: String,

    #[validate(length(min = 1, message = "LoanType can not be a null or empty"))]
    pub loan_type: String,

    #[validate(range(min = 1, message = "Total loan amount should be greater than zero"))]
    pub total_loan: i64,

    #[validate(range(min = 0, message = "Total loan amount paid should be equal or greater than zero"))]
    pub amount_paid: i64,

    #[serde(default)]
    pub outstanding_amount: i64,
}

impl From<Loan> for LoansDto {
    fn from(loan: Loan) -> Self {
        Self {
            mobile_number: loan.mobile_number,
            loan_number: loan.loan_number,
            loan_type: loan.loan_type,
            total_loan: loan.total_loan,
            amount_paid: loan.amount_paid,
            outstanding_amount: loan.outstanding_amount,
        }
    }
}

impl Loan {
    pub fn apply(&mut self, dto: &LoansDto) {
        self.loan_type = dto.loan_type.clone();
        self.total_loan = dto.total_loan;
        self.amount_paid = dto.amount_paid;
        self.outstanding_amount = dto.total_loan - dto.amount_paid;
    }
}
