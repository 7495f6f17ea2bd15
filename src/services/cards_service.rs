//! Cards service - create, fetch, update and delete the card held by a mobile number.
//!
//! A mobile number holds at most one card. Cards are created with defaults
//! (credit card, full limit available) and addressed by card number on update.

use std::sync::Arc;

use crate::{
    audit::Auditor,
    error::AppError,
    models::card::{CardsDto, NewCard},
    numbers::{NumberGenerator, allocate_unique},
    repositories::CardRepository,
};

pub struct CardsService {
    repository: Arc<dyn CardRepository>,
    numbers: Arc<dyn NumberGenerator>,
    auditor: Arc<dyn Auditor>,
}

impl CardsService {
    pub fn new(
        repository: Arc<dyn CardRepository>,
        numbers: Arc<dyn NumberGenerator>,
        auditor: Arc<dyn Auditor>,
    ) -> Self {
        Self {
            repository,
            numbers,
            auditor,
        }
    }

    /// Issue a default credit card for `mobile_number`.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists`: the mobile number already holds a card
    /// - `Internal`: no free card number could be generated
    pub async fn create_card(&self, mobile_number: &str) -> Result<(), AppError> {
        if self
            .repository
            .find_by_mobile_number(mobile_number)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "Card already registered with given mobileNumber {mobile_number}"
            )));
        }

        let repository = &self.repository;
        let card_number = allocate_unique(self.numbers.as_ref(), "card", |n| async move {
            repository
                .find_by_card_number(&n.to_string())
                .await
                .map(|found| found.is_some())
        })
        .await?;

        let card = self
            .repository
            .insert(
                &NewCard::credit_card(mobile_number, card_number.to_string()),
                &self.auditor.current_actor(),
            )
            .await?;

        tracing::info!(card_id = card.card_id, "Card created");
        Ok(())
    }

    /// # Errors
    ///
    /// - `NotFound`: the mobile number holds no card
    pub async fn fetch_card(&self, mobile_number: &str) -> Result<CardsDto, AppError> {
        let card = self
            .repository
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| AppError::not_found("Card", "mobileNumber", mobile_number))?;

        tracing::debug!(card_id = card.card_id, "Card fetched");
        Ok(card.into())
    }

    /// Overwrite type, limit and amount used of the card with `dto.card_number`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: amount used exceeds the limit
    /// - `NotFound`: no card has that number
    pub async fn update_card(&self, dto: CardsDto) -> Result<bool, AppError> {
        if dto.amount_used > dto.total_limit {
            return Err(AppError::InvalidRequest(
                "Amount used cannot exceed the total card limit".to_string(),
            ));
        }

        let mut card = self
            .repository
            .find_by_card_number(&dto.card_number)
            .await?
            .ok_or_else(|| AppError::not_found("Card", "CardNumber", &dto.card_number))?;

        card.apply(&dto);
        self.repository
            .update(&card, &self.auditor.current_actor())
            .await?;

        tracing::info!(card_id = card.card_id, "Card updated");
        Ok(true)
    }

    /// # Errors
    ///
    /// - `NotFound`: the mobile number holds no card
    pub async fn delete_card(&self, mobile_number: &str) -> Result<bool, AppError> {
        let card = self
            .repository
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| AppError::not_found("Card", "mobileNumber", mobile_number))?;

        self.repository.delete(card.card_id).await?;

        tracing::info!(card_id = card.card_id, "Card deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::{
        audit::{CARDS_ACTOR, FixedAuditor},
        models::card::{CREDIT_CARD, NEW_CARD_LIMIT},
        numbers::SequenceNumberGenerator,
        repositories::InMemoryCardRepository,
    };

    const MOBILE: &str = "9876543210";

    fn service() -> (CardsService, Arc<InMemoryCardRepository>) {
        let repository = Arc::new(InMemoryCardRepository::new());
        let service = CardsService::new(
            repository.clone(),
            Arc::new(SequenceNumberGenerator::starting_at(100_000_000_001)),
            Arc::new(FixedAuditor::new(CARDS_ACTOR)),
        );
        (service, repository)
    }

    #[tokio::test]
    async fn create_then_fetch_returns_defaults() {
        let (service, _) = service();

        service.create_card(MOBILE).await.unwrap();
        let card = service.fetch_card(MOBILE).await.unwrap();

        assert_eq!(
            card,
            CardsDto {
                mobile_number: MOBILE.into(),
                card_number: "100000000001".into(),
                card_type: CREDIT_CARD.into(),
                total_limit: NEW_CARD_LIMIT,
                amount_used: 0,
                available_amount: NEW_CARD_LIMIT,
            }
        );
    }

    #[tokio::test]
    async fn second_create_for_same_mobile_fails() {
        let (service, _) = service();
        service.create_card(MOBILE).await.unwrap();

        let result = service.create_card(MOBILE).await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn create_skips_numbers_already_issued() {
        let repository = Arc::new(InMemoryCardRepository::new());
        repository
            .insert(&NewCard::credit_card("1111111111", "100000000001".into()), "SEED")
            .await
            .unwrap();
        let service = CardsService::new(
            repository.clone(),
            Arc::new(SequenceNumberGenerator::starting_at(100_000_000_001)),
            Arc::new(FixedAuditor::new(CARDS_ACTOR)),
        );

        service.create_card(MOBILE).await.unwrap();

        assert_eq!(
            service.fetch_card(MOBILE).await.unwrap().card_number,
            "100000000002"
        );
    }

    #[tokio::test]
    async fn missing_card_is_not_found_everywhere() {
        let (service, _) = service();

        assert!(matches!(
            service.fetch_card(MOBILE).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete_card(MOBILE).await,
            Err(AppError::NotFound { .. })
        ));

        let dto = CardsDto {
            mobile_number: MOBILE.into(),
            card_number: "100000000001".into(),
            card_type: CREDIT_CARD.into(),
            total_limit: 10,
            amount_used: 1,
            available_amount: 9,
        };
        assert!(matches!(
            service.update_card(dto).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn update_changes_only_mutable_fields() {
        let (service, repository) = service();
        service.create_card(MOBILE).await.unwrap();
        let before = repository.find_by_mobile_number(MOBILE).await.unwrap().unwrap();

        let mut dto = service.fetch_card(MOBILE).await.unwrap();
        dto.mobile_number = "1231231234".into();
        dto.card_type = "Debit Card".into();
        dto.total_limit = 50_000;
        dto.amount_used = 12_000;
        dto.available_amount = 1;

        assert!(service.update_card(dto).await.unwrap());

        let after = repository.find_by_mobile_number(MOBILE).await.unwrap().unwrap();
        assert_eq!(after.card_id, before.card_id);
        assert_eq!(after.card_number, before.card_number);
        assert_eq!(after.mobile_number, MOBILE);
        assert_eq!(after.card_type, "Debit Card");
        assert_eq!(after.available_amount, 38_000);
        assert_eq!(after.audit.created_by, CARDS_ACTOR);
        assert_eq!(after.audit.updated_by.as_deref(), Some(CARDS_ACTOR));
    }

    #[tokio::test]
    async fn update_rejects_usage_above_limit() {
        let (service, _) = service();
        service.create_card(MOBILE).await.unwrap();

        let mut dto = service.fetch_card(MOBILE).await.unwrap();
        dto.amount_used = dto.total_limit + 1;

        assert!(matches!(
            service.update_card(dto).await,
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn delete_then_fetch_is_not_found() {
        let (service, _) = service();
        service.create_card(MOBILE).await.unwrap();

        assert!(service.delete_card(MOBILE).await.unwrap());
        assert!(matches!(
            service.fetch_card(MOBILE).await,
            Err(AppError::NotFound { .. })
        ));
    }
}
