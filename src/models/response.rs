//! Response envelopes shared by every service.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{account::AccountsDto, card::CardsDto, loan::LoansDto};

pub const STATUS_200: &str = "200";
pub const MESSAGE_200: &str = "Request processed successfully";
pub const STATUS_201: &str = "201";
pub const STATUS_417: &str = "417";
pub const MESSAGE_417_UPDATE: &str = "Update operation failed. Please try again or contact Dev team";
pub const MESSAGE_417_DELETE: &str = "Delete operation failed. Please try again or contact Dev team";

/// Status envelope returned by create, update and delete endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "statusCode": "201",
///   "statusMessage": "Card created successfully"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDto {
    pub status_code: String,
    pub status_message: String,
}

impl ResponseDto {
    pub fn new(status_code: &str, status_message: &str) -> Self {
        Self {
            status_code: status_code.to_string(),
            status_message: status_message.to_string(),
        }
    }
}

/// Error body produced by [`crate::error::AppError`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseDto {
    /// Request path, as `uri=/api/...`
    pub api_path: String,

    /// Status name, e.g. `NOT_FOUND`
    pub error_code: String,

    pub error_message: String,

    pub error_time: DateTime<Utc>,
}

/// Support contacts reported by each service's `contact-info` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfoDto {
    pub message: String,
    pub contact_details: BTreeMap<String, String>,
    pub on_call_support: Vec<String>,
}

/// Composite read-only view of one customer across all three services.
///
/// `cardsDto` and `loansDto` are omitted when the customer holds no card or loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailsDto {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub accounts_dto: Option<AccountsDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards_dto: Option<CardsDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loans_dto: Option<LoansDto>,
}
