//! Customer and account data models and API request/response types.
//!
//! This module defines:
//! - `Customer`: Database entity owning the mobile number
//! - `Account`: Database entity linked to exactly one customer
//! - `CustomerDto` / `AccountsDto`: JSON shapes exchanged with clients

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::{validate_account_number, validate_mobile_number};
use crate::audit::Audit;

/// Account type given to every new account.
pub const SAVINGS: &str = "Savings";

/// Branch address given to every new account.
pub const ADDRESS: &str = "123 Main Street, New York";

/// Represents a customer record from the database.
///
/// Maps to the `customers` table. The mobile number is the owner key used by
/// every lookup coming from clients.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Customer {
    /// System-assigned identifier
    pub customer_id: i64,

    pub name: String,

    pub email: String,

    /// Owner key, unique across customers
    pub mobile_number: String,

    #[sqlx(flatten)]
    pub audit: Audit,
}

/// Represents an account record from the database.
///
/// Maps to the `accounts` table. The account number is generated on creation
/// and is also the primary key.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Account {
    pub account_number: i64,

    /// Foreign key to the owning customer
    pub customer_id: i64,

    pub account_type: String,

    pub branch_address: String,

    #[sqlx(flatten)]
    pub audit: Audit,
}

/// Customer fields supplied on creation.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
}

/// Account fields synthesized on creation. The customer id is only known once
/// the customer row is written.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub account_number: i64,
    pub account_type: String,
    pub branch_address: String,
}

impl NewAccount {
    /// Default savings account with the given number.
    pub fn savings(account_number: i64) -> Self {
        Self {
            account_number,
            account_type: SAVINGS.to_string(),
            branch_address: ADDRESS.to_string(),
        }
    }
}

/// Account section of [`CustomerDto`].
///
/// # JSON Example
///
/// ```json
/// {
///   "accountNumber": 1234567890,
///   "accountType": "Savings",
///   "branchAddress": "123 Main Street, New York"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountsDto {
    #[validate(custom(function = "validate_account_number"))]
    pub account_number: i64,

    #[validate(length(min = 1, message = "Account type cannot be null or empty."))]
    pub account_type: String,

    #[validate(length(min = 1, message = "Branch address cannot be null or empty."))]
    pub branch_address: String,
}

impl From<Account> for AccountsDto {
    fn from(account: Account) -> Self {
        Self {
            account_number: account.account_number,
            account_type: account.account_type,
            branch_address: account.branch_address,
        }
    }
}

/// Request and response body of the accounts service.
///
/// On create only `name`, `email` and `mobileNumber` are used. On update the
/// `accountsDto` section selects the account to change; without it the update
/// reports failure.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "John Doe",
///   "email": "john@example.com",
///   "mobileNumber": "9876543210",
///   "accountsDto": { "accountNumber": 1234567890, "accountType": "Savings", "branchAddress": "..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[validate(length(min = 5, max = 30, message = "Name must be between 5 and 30 characters."))]
    pub name: String,

    #[validate(email(message = "Email should be valid."))]
    pub email: String,

    #[validate(custom(function = "validate_mobile_number"))]
    pub mobile_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub accounts_dto: Option<AccountsDto>,
}

impl CustomerDto {
    pub fn from_parts(customer: Customer, account: Account) -> Self {
        Self {
            name: customer.name,
            email: customer.email,
            mobile_number: customer.mobile_number,
            accounts_dto: Some(account.into()),
        }
    }
}

impl From<&CustomerDto> for NewCustomer {
    fn from(dto: &CustomerDto) -> Self {
        Self {
            name: dto.name.clone(),
            email: dto.email.clone(),
            mobile_number: dto.mobile_number.clone(),
        }
    }
}

impl Customer {
    /// Overwrite the mutable customer fields. The mobile number is the owner
    /// key and is left as stored.
    pub fn apply(&mut self, dto: &CustomerDto) {
        self.name = dto.name.clone();
        self.email = dto.email.clone();
    }
}

impl Account {
    /// Overwrite the mutable account fields. Number and owner stay fixed.
    pub fn apply(&mut self, dto: &AccountsDto) {
        self.account_type = dto.account_type.clone();
        self.branch_address = dto.branch_address.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CustomerDto {
        CustomerDto {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            mobile_number: "9876543210".into(),
            accounts_dto: None,
        }
    }

    #[test]
    fn valid_customer_passes() {
        assert!(dto().validate().is_ok());
    }

    #[test]
    fn short_name_and_bad_email_are_rejected() {
        let invalid = CustomerDto {
            name: "Jo".into(),
            email: "not-an-email".into(),
            ..dto()
        };

        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn nested_account_is_validated() {
        let invalid = CustomerDto {
            accounts_dto: Some(AccountsDto {
                account_number: 12,
                account_type: String::new(),
                branch_address: "Somewhere".into(),
            }),
            ..dto()
        };

        assert!(invalid.validate().is_err());
    }

    #[test]
    fn dto_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(dto()).unwrap();

        assert_eq!(json["mobileNumber"], "9876543210");
        assert!(json.get("accountsDto").is_none());
    }
}
