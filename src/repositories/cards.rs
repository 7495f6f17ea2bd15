//! Card store.

use async_trait::async_trait;

use crate::{
    db::DbPool,
    error::AppError,
    models::card::{Card, NewCard},
};

/// Storage contract of the cards service.
#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Card>, AppError>;

    async fn find_by_card_number(&self, card_number: &str) -> Result<Option<Card>, AppError>;

    /// Insert a card, stamping `actor` as creator.
    ///
    /// Fails with `AlreadyExists` if the mobile number or card number is taken.
    async fn insert(&self, card: &NewCard, actor: &str) -> Result<Card, AppError>;

    /// Persist the mutable fields of `card`, stamping `actor` as modifier.
    async fn update(&self, card: &Card, actor: &str) -> Result<Card, AppError>;

    async fn delete(&self, card_id: i64) -> Result<(), AppError>;
}

const CARD_COLUMNS: &str = "card_id, mobile_number, card_number, card_type, total_limit, \
     amount_used, available_amount, created_at, created_by, updated_at, updated_by";

/// PostgreSQL card store.
#[derive(Clone)]
pub struct PgCardRepository {
    pool: DbPool,
}

impl PgCardRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardRepository for PgCardRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Card>, AppError> {
        let card = sqlx::query_as::<_, Card>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE mobile_number = $1"
        ))
        .bind(mobile_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    async fn find_by_card_number(&self, card_number: &str) -> Result<Option<Card>, AppError> {
        let card = sqlx::query_as::<_, Card>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE card_number = $1"
        ))
        .bind(card_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    async fn insert(&self, card: &NewCard, actor: &str) -> Result<Card, AppError> {
        sqlx::query_as::<_, Card>(&format!(
            r#"
            INSERT INTO cards (
                mobile_number, card_number, card_type,
                total_limit, amount_used, available_amount, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CARD_COLUMNS}
            "#
        ))
        .bind(&card.mobile_number)
        .bind(&card.card_number)
        .bind(&card.card_type)
        .bind(card.total_limit)
        .bind(card.amount_used)
        .bind(card.available_amount)
        .bind(actor)
        .fetch_one(&self.pool)
        .await
        // The unique index closes the gap between the service's existence check and this insert
        .map_err(|err| {
            AppError::from_insert(err, || {
                format!(
                    "Card already registered with given mobileNumber {}",
                    card.mobile_number
                )
            })
        })
    }

    async fn update(&self, card: &Card, actor: &str) -> Result<Card, AppError> {
        sqlx::query_as::<_, Card>(&format!(
            r#"
            UPDATE cards
            SET card_type = $1,
                total_limit = $2,
                amount_used = $3,
                available_amount = $4,
                updated_at = NOW(),
                updated_by = $5
            WHERE card_id = $6
            RETURNING {CARD_COLUMNS}
            "#
        ))
        .bind(&card.card_type)
        .bind(card.total_limit)
        .bind(card.amount_used)
        .bind(card.available_amount)
        .bind(actor)
        .bind(card.card_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Card", "CardNumber", &card.card_number))
    }

    async fn delete(&self, card_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cards WHERE card_id = $1")
            .bind(card_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Card", "cardId", card_id));
        }

        Ok(())
    }
}
