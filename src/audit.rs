//! Audit metadata stamped on every stored record.
//!
//! Callers never supply these fields. The domain services ask their
//! [`Auditor`] for the current actor and hand it to the repository, which
//! records it together with the write timestamp.

use chrono::{DateTime, Utc};

/// Actor recorded by the accounts service.
pub const ACCOUNTS_ACTOR: &str = "ACCOUNTS_MS";
/// Actor recorded by the cards service.
pub const CARDS_ACTOR: &str = "CARDS_MS";
/// Actor recorded by the loans service.
pub const LOANS_ACTOR: &str = "LOANS_MS";

/// Source of the actor name written into audit columns.
pub trait Auditor: Send + Sync {
    fn current_actor(&self) -> String;
}

/// Auditor that always reports the same actor.
#[derive(Debug, Clone)]
pub struct FixedAuditor {
    actor: String,
}

impl FixedAuditor {
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
        }
    }
}

impl Auditor for FixedAuditor {
    fn current_actor(&self) -> String {
        self.actor.clone()
    }
}

/// Audit columns shared by every table.
///
/// `updated_at` and `updated_by` stay `None` until the first update.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl Audit {
    /// Audit block for a freshly inserted record.
    pub fn created_by(actor: &str) -> Self {
        Self {
            created_at: Utc::now(),
            created_by: actor.to_string(),
            updated_at: None,
            updated_by: None,
        }
    }

    /// Record a modification by `actor`.
    pub fn touch(&mut self, actor: &str) {
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(actor.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_keeps_creation_fields() {
        let mut audit = Audit::created_by(CARDS_ACTOR);
        let created_at = audit.created_at;

        audit.touch("BATCH_JOB");

        assert_eq!(audit.created_by, CARDS_ACTOR);
        assert_eq!(audit.created_at, created_at);
        assert_eq!(audit.updated_by.as_deref(), Some("BATCH_JOB"));
        assert!(audit.updated_at.is_some());
    }

    #[test]
    fn fixed_auditor_reports_its_actor() {
        assert_eq!(FixedAuditor::new(LOANS_ACTOR).current_actor(), "LOANS_MS");
    }
}
