//! In-memory identity directory.
//!
//! Stands in for the account service: a token table and a trainer
//! table seeded at startup or by tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::application::ports::{IdentityDirectory, IdentityError, Trainer, TrainerFilter};
use crate::domain::shared::{Page, TrainerId};

#[derive(Debug, Clone)]
struct TrainerRow {
    trainer: Trainer,
    seq: u64,
}

#[derive(Debug, Default)]
struct Directory {
    trainers: HashMap<String, TrainerRow>,
    tokens: HashMap<String, TrainerId>,
    next_seq: u64,
}

/// In-memory implementation of `IdentityDirectory`.
#[derive(Debug, Default)]
pub struct InMemoryIdentityDirectory {
    inner: RwLock<Directory>,
}

impl InMemoryIdentityDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trainer and the bearer token that authenticates them.
    pub fn register(&self, trainer: Trainer, token: &str) {
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.tokens.insert(token.to_string(), trainer.id.clone());
        inner
            .trainers
            .insert(trainer.id.to_string(), TrainerRow { trainer, seq });
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryIdentityDirectory {
    async fn authenticate(&self, token: &str) -> Result<Option<TrainerId>, IdentityError> {
        let inner = self
            .inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(inner.tokens.get(token).cloned())
    }

    async fn find(&self, id: &TrainerId) -> Result<Option<Trainer>, IdentityError> {
        let inner = self
            .inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(inner.trainers.get(id.as_str()).map(|row| row.trainer.clone()))
    }

    async fn search(
        &self,
        filter: &TrainerFilter,
        page: Page,
    ) -> Result<Vec<Trainer>, IdentityError> {
        let inner = self
            .inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut rows: Vec<&TrainerRow> = inner
            .trainers
            .values()
            .filter(|row| filter.matches(&row.trainer))
            .collect();
        rows.sort_by_key(|row| row.seq);
        Ok(page
            .slice(rows)
            .into_iter()
            .map(|row| row.trainer.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trainer(id: &str, login: &str) -> Trainer {
        Trainer {
            id: TrainerId::new(id),
            first_name: "Ash".to_string(),
            last_name: "Ketchum".to_string(),
            login: login.to_string(),
            birth_date: None,
        }
    }

    #[tokio::test]
    async fn token_resolves_to_trainer() {
        let directory = InMemoryIdentityDirectory::new();
        directory.register(trainer("t-1", "ash"), "secret-token");

        let id = directory.authenticate("secret-token").await.unwrap();
        assert_eq!(id, Some(TrainerId::new("t-1")));
        assert_eq!(directory.authenticate("wrong").await.unwrap(), None);
    }

    #[tokio::test]
    async fn search_respects_filter_and_order() {
        let directory = InMemoryIdentityDirectory::new();
        directory.register(trainer("t-1", "ash"), "tok-1");
        directory.register(trainer("t-2", "ashley"), "tok-2");
        directory.register(trainer("t-3", "misty"), "tok-3");

        let filter = TrainerFilter {
            login: Some("ash".to_string()),
            ..TrainerFilter::default()
        };
        let found = directory.search(&filter, Page::default()).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, TrainerId::new("t-1"));
    }
}
