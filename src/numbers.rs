//! Generation of account, card and loan numbers.
//!
//! Numbers come from a [`NumberGenerator`]. The random generator does not
//! guarantee uniqueness on its own, so callers go through [`allocate_unique`]
//! which re-checks every candidate against the store before using it.

use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};

use rand::Rng;

use crate::error::AppError;

/// How many candidates are tried before giving up on a create.
pub const MAX_NUMBER_ATTEMPTS: usize = 5;

/// Produces candidate record numbers.
pub trait NumberGenerator: Send + Sync {
    fn next_number(&self) -> i64;
}

/// Uniformly random numbers in `[base, base + span)`.
#[derive(Debug, Clone, Copy)]
pub struct RandomNumberGenerator {
    base: i64,
    span: i64,
}

impl RandomNumberGenerator {
    pub const fn new(base: i64, span: i64) -> Self {
        Self { base, span }
    }

    /// 10 digit account numbers.
    pub const fn account_numbers() -> Self {
        Self::new(1_000_000_000, 900_000_000)
    }

    /// 12 digit card numbers.
    pub const fn card_numbers() -> Self {
        Self::new(100_000_000_000, 900_000_000)
    }

    /// 12 digit loan numbers.
    pub const fn loan_numbers() -> Self {
        Self::new(100_000_000_000, 900_000_000)
    }
}

impl NumberGenerator for RandomNumberGenerator {
    fn next_number(&self) -> i64 {
        self.base + rand::rng().random_range(0..self.span)
    }
}

/// Monotonic numbers starting at a fixed value.
///
/// Useful where predictable numbers are wanted, e.g. fixtures and demos.
#[derive(Debug)]
pub struct SequenceNumberGenerator {
    next: AtomicI64,
}

impl SequenceNumberGenerator {
    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }
}

impl NumberGenerator for SequenceNumberGenerator {
    fn next_number(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// Draw numbers from `generator` until `is_taken` reports a free one.
///
/// # Errors
///
/// - `Internal`: every one of the [`MAX_NUMBER_ATTEMPTS`] candidates was taken
/// - anything returned by `is_taken`
pub async fn allocate_unique<F, Fut>(
    generator: &dyn NumberGenerator,
    kind: &str,
    mut is_taken: F,
) -> Result<i64, AppError>
where
    F: FnMut(i64) -> Fut,
    Fut: Future<Output = Result<bool, AppError>>,
{
    for attempt in 1..=MAX_NUMBER_ATTEMPTS {
        let candidate = generator.next_number();
        if !is_taken(candidate).await? {
            return Ok(candidate);
        }
        tracing::warn!(kind, candidate, attempt, "Generated number already in use");
    }

    Err(AppError::Internal(format!(
        "Could not allocate a unique {kind} number"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_numbers_have_expected_width() {
        let accounts = RandomNumberGenerator::account_numbers();
        let cards = RandomNumberGenerator::card_numbers();

        for _ in 0..1_000 {
            assert_eq!(accounts.next_number().to_string().len(), 10);
            assert_eq!(cards.next_number().to_string().len(), 12);
        }
    }

    #[test]
    fn sequence_counts_up() {
        let generator = SequenceNumberGenerator::starting_at(7);

        assert_eq!(generator.next_number(), 7);
        assert_eq!(generator.next_number(), 8);
    }

    #[tokio::test]
    async fn allocate_skips_taken_numbers() {
        let generator = SequenceNumberGenerator::starting_at(100);

        let number = allocate_unique(&generator, "card", |n| async move { Ok::<_, AppError>(n < 102) })
            .await
            .unwrap();

        assert_eq!(number, 102);
    }

    #[tokio::test]
    async fn allocate_gives_up_after_max_attempts() {
        let generator = SequenceNumberGenerator::starting_at(1);

        let result = allocate_unique(&generator, "loan", |_| async { Ok::<_, AppError>(true) }).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(generator.next_number(), 1 + MAX_NUMBER_ATTEMPTS as i64);
    }
}
