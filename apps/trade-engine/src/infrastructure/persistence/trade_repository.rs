//! In-memory trade ledger.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::shared::{Page, TradeId, TrainerId};
use crate::domain::trading::aggregate::Trade;
use crate::domain::trading::errors::TradeError;
use crate::domain::trading::repository::TradeRepository;
use crate::domain::trading::value_objects::TradeStatus;

#[derive(Debug, Clone)]
struct TradeRow {
    trade: Trade,
    seq: u64,
}

/// In-memory implementation of `TradeRepository` with
/// compare-and-swap updates.
#[derive(Debug, Default)]
pub struct InMemoryTradeRepository {
    rows: RwLock<HashMap<String, TradeRow>>,
    next_seq: RwLock<u64>,
}

impl InMemoryTradeRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trades in the ledger.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().unwrap_or_else(std::sync::PoisonError::into_inner).len()
    }

    /// Check if the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn take_seq(&self) -> u64 {
        let mut next = self
            .next_seq
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let seq = *next;
        *next += 1;
        seq
    }
}

#[async_trait]
impl TradeRepository for InMemoryTradeRepository {
    async fn insert(&self, trade: &Trade) -> Result<(), TradeError> {
        let seq = self.take_seq();
        let mut rows = self
            .rows
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rows.insert(
            trade.id().to_string(),
            TradeRow {
                trade: trade.clone(),
                seq,
            },
        );
        Ok(())
    }

    async fn update(&self, trade: &Trade) -> Result<(), TradeError> {
        let mut rows = self
            .rows
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let row = rows
            .get_mut(trade.id().as_str())
            .ok_or_else(|| TradeError::NotFound {
                trade_id: trade.id().to_string(),
            })?;
        if row.trade.version() != trade.version() {
            return Err(TradeError::Conflict {
                message: format!(
                    "trade {} was modified concurrently (stored version {}, caller version {})",
                    trade.id(),
                    row.trade.version(),
                    trade.version()
                ),
            });
        }
        row.trade = trade.clone();
        row.trade.bump_version();
        Ok(())
    }

    async fn find_by_id(&self, id: &TradeId) -> Result<Option<Trade>, TradeError> {
        let rows = self
            .rows
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(rows.get(id.as_str()).map(|row| row.trade.clone()))
    }

    async fn list_for_trainer(
        &self,
        trainer_id: &TrainerId,
        status: Option<TradeStatus>,
        page: Page,
    ) -> Result<Vec<Trade>, TradeError> {
        let rows = self
            .rows
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut matching: Vec<&TradeRow> = rows
            .values()
            .filter(|row| {
                (row.trade.sender_id() == trainer_id || row.trade.is_receiver(trainer_id))
                    && status.is_none_or(|s| row.trade.status() == s)
            })
            .collect();
        matching.sort_by_key(|row| row.seq);
        Ok(page
            .slice(matching)
            .into_iter()
            .map(|row| row.trade.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::PokemonId;
    use crate::domain::trading::aggregate::ProposeTradeCommand;

    fn trade(sender: &str, receiver: &str) -> Trade {
        Trade::propose(ProposeTradeCommand {
            sender_id: TrainerId::new(sender),
            receiver_id: TrainerId::new(receiver),
            offered: vec![PokemonId::generate()],
            wanted: vec![PokemonId::generate()],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn insert_and_find() {
        let repo = InMemoryTradeRepository::new();
        let t = trade("ash", "misty");
        repo.insert(&t).await.unwrap();

        let found = repo.find_by_id(t.id()).await.unwrap().unwrap();
        assert_eq!(found.id(), t.id());
        assert_eq!(found.version(), 0);
    }

    #[tokio::test]
    async fn update_bumps_stored_version() {
        let repo = InMemoryTradeRepository::new();
        let mut t = trade("ash", "misty");
        repo.insert(&t).await.unwrap();

        t.accept().unwrap();
        repo.update(&t).await.unwrap();

        let stored = repo.find_by_id(t.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), TradeStatus::Accepted);
        assert_eq!(stored.version(), 1);
    }

    #[tokio::test]
    async fn stale_version_update_conflicts() {
        let repo = InMemoryTradeRepository::new();
        let t = trade("ash", "misty");
        repo.insert(&t).await.unwrap();

        // Writer A wins the race.
        let mut a = repo.find_by_id(t.id()).await.unwrap().unwrap();
        a.accept().unwrap();
        repo.update(&a).await.unwrap();

        // Writer B loaded version 0 and must lose.
        let mut b = t.clone();
        b.decline_by_receiver().unwrap();
        let err = repo.update(&b).await.unwrap_err();
        assert!(matches!(err, TradeError::Conflict { .. }));
    }

    #[tokio::test]
    async fn list_filters_by_participant_and_status() {
        let repo = InMemoryTradeRepository::new();
        let mine = trade("ash", "misty");
        let other = trade("brock", "misty");
        let unrelated = trade("brock", "jessie");
        repo.insert(&mine).await.unwrap();
        repo.insert(&other).await.unwrap();
        repo.insert(&unrelated).await.unwrap();
        assert_eq!(repo.len(), 3);

        let ash_trades = repo
            .list_for_trainer(&TrainerId::new("ash"), None, Page::default())
            .await
            .unwrap();
        assert_eq!(ash_trades.len(), 1);

        let misty_pending = repo
            .list_for_trainer(
                &TrainerId::new("misty"),
                Some(TradeStatus::Proposition),
                Page::default(),
            )
            .await
            .unwrap();
        assert_eq!(misty_pending.len(), 2);

        let misty_accepted = repo
            .list_for_trainer(
                &TrainerId::new("misty"),
                Some(TradeStatus::Accepted),
                Page::default(),
            )
            .await
            .unwrap();
        assert!(misty_accepted.is_empty());
    }
}
