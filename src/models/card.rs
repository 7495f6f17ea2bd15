//! Card data models and API request/response types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::{validate_card_number, validate_mobile_number};
use crate::audit::Audit;

/// Card type given to every new card.
pub const CREDIT_CARD: &str = "Credit Card";

/// Credit limit given to every new card.
pub const NEW_CARD_LIMIT: i64 = 100_000;

/// Represents a card record from the database.
///
/// Maps to the `cards` table. Amounts are whole currency units and always
/// satisfy `amount_used <= total_limit`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Card {
    pub card_id: i64,

    /// Owner key
    pub mobile_number: String,

    /// Generated 12 digit number, used by clients to address the card on update
    pub card_number: String,

    pub card_type: String,

    pub total_limit: i64,

    pub amount_used: i64,

    /// Always `total_limit - amount_used`
    pub available_amount: i64,

    #[sqlx(flatten)]
    pub audit: Audit,
}

/// Card fields written on creation.
#[derive(Debug, Clone)]
pub struct NewCard {
    pub mobile_number: String,
    pub card_number: String,
    pub card_type: String,
    pub total_limit: i64,
    pub amount_used: i64,
    pub available_amount: i64,
}

impl NewCard {
    /// Default credit card with the full limit available.
    pub fn credit_card(mobile_number: &str, card_number: String) -> Self {
        Self {
            mobile_number: mobile_number.to_string(),
            card_number,
            card_type: CREDIT_CARD.to_string(),
            total_limit: NEW_CARD_LIMIT,
            amount_used: 0,
            available_amount: NEW_CARD_LIMIT,
        }
    }
}

/// Request and response body of the cards service.
///
/// `availableAmount` is derived from the limit and amount used; any value
/// sent by the client is ignored.
///
/// # JSON Example
///
/// ```json
/// {
///   "mobileNumber": "9876543210",
///   "cardNumber": "100012345678",
///   "cardType": "Credit Card",
///   "totalLimit": 100000,
///   "amountUsed": 1000,
///   "availableAmount": 99000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CardsDto {
    #[validate(custom(function = "validate_mobile_number"))]
    pub mobile_number: String,

    #[validate(custom(function = "validate_card_number"))]
    pub card_number: String,

    #[validate(length(min = 1, message = "CardType can not be a null or empty"))]
    pub card_type: String,

    #[validate(range(min = 1, message = "Total card limit should be greater than zero"))]
    pub total_limit: i64,

    #[validate(range(min = 0, message = "Total amount used should be equal or greater than zero"))]
    pub amount_used: i64,

    #[serde(default)]
    pub available_amount: i64,
}

impl From<Card> for CardsDto {
    fn from(card: Card) -> Self {
        Self {
            mobile_number: card.mobile_number,
            card_number: card.card_number,
            card_type: card.card_type,
            total_limit: card.total_limit,
            amount_used: card.amount_used,
            available_amount: card.available_amount,
        }
    }
}

impl Card {
    /// Overwrite the mutable card fields and recompute the available amount.
    /// Card number and mobile number stay as stored.
    pub fn apply(&mut self, dto: &CardsDto) {
        self.card_type = dto.card_type.clone();
        self.total_limit = dto.total_limit;
        self.amount_used = dto.amount_used;
        self.available_amount = dto.total_limit - dto.amount_used;
    }
}
