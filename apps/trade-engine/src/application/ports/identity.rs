//! Identity directory port.
//!
//! Trainer accounts live outside this service; the engine only needs to
//! resolve a bearer token to a trainer id and look trainers up for
//! display. The directory is a read-only collaborator.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{Page, TrainerId};

/// A trainer profile as the directory knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    /// Directory-assigned identifier.
    pub id: TrainerId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique login handle.
    pub login: String,
    /// Birth date, when the trainer chose to share it.
    pub birth_date: Option<NaiveDate>,
}

/// Filter for trainer lookups. Empty matches everyone.
#[derive(Debug, Clone, Default)]
pub struct TrainerFilter {
    /// Given-name substring, case-insensitive.
    pub first_name: Option<String>,
    /// Family-name substring, case-insensitive.
    pub last_name: Option<String>,
    /// Login substring, case-insensitive.
    pub login: Option<String>,
}

impl TrainerFilter {
    /// Check whether a trainer satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, trainer: &Trainer) -> bool {
        contains_ci(&trainer.first_name, self.first_name.as_deref())
            && contains_ci(&trainer.last_name, self.last_name.as_deref())
            && contains_ci(&trainer.login, self.login.as_deref())
    }
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

/// Errors from the identity directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The directory could not be reached or answered abnormally.
    #[error("identity directory unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to trainer accounts.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Resolve a bearer token to the trainer it authenticates.
    ///
    /// Returns `None` for unknown or expired tokens.
    ///
    /// # Errors
    ///
    /// `Unavailable` when the directory cannot answer.
    async fn authenticate(&self, token: &str) -> Result<Option<TrainerId>, IdentityError>;

    /// Look a trainer up by id.
    ///
    /// # Errors
    ///
    /// `Unavailable` when the directory cannot answer.
    async fn find(&self, id: &TrainerId) -> Result<Option<Trainer>, IdentityError>;

    /// Paginated trainer search, sorted by registration order.
    ///
    /// # Errors
    ///
    /// `Unavailable` when the directory cannot answer.
    async fn search(&self, filter: &TrainerFilter, page: Page)
    -> Result<Vec<Trainer>, IdentityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trainer() -> Trainer {
        Trainer {
            id: TrainerId::new("t-1"),
            first_name: "Ash".to_string(),
            last_name: "Ketchum".to_string(),
            login: "ash.k".to_string(),
            birth_date: None,
        }
    }

    #[test]
    fn empty_filter_matches() {
        assert!(TrainerFilter::default().matches(&trainer()));
    }

    #[test]
    fn login_filter_is_case_insensitive_substring() {
        let filter = TrainerFilter {
            login: Some("ASH".to_string()),
            ..TrainerFilter::default()
        };
        assert!(filter.matches(&trainer()));

        let miss = TrainerFilter {
            login: Some("misty".to_string()),
            ..TrainerFilter::default()
        };
        assert!(!miss.matches(&trainer()));
    }

    #[test]
    fn all_criteria_must_match() {
        let filter = TrainerFilter {
            first_name: Some("ash".to_string()),
            last_name: Some("oak".to_string()),
            login: None,
        };
        assert!(!filter.matches(&trainer()));
    }
}
