//! Trade Repository Trait
//!
//! Defines the persistence abstraction for trades (the trade ledger).
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use crate::domain::shared::{Page, TradeId, TrainerId};
use crate::domain::trading::aggregate::Trade;
use crate::domain::trading::errors::TradeError;
use crate::domain::trading::value_objects::TradeStatus;

/// Repository trait for Trade persistence.
#[async_trait]
pub trait TradeRepository: Send + Sync {
    /// Insert a newly proposed trade.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn insert(&self, trade: &Trade) -> Result<(), TradeError>;

    /// Update an existing trade with compare-and-swap on its version.
    ///
    /// On success the stored version is bumped; the caller should treat
    /// its in-memory copy as stale afterwards and re-fetch if needed.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the stored version no longer matches the
    /// version the trade was loaded at, `NotFound` if the trade was
    /// never inserted.
    async fn update(&self, trade: &Trade) -> Result<(), TradeError>;

    /// Find a trade by its ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &TradeId) -> Result<Option<Trade>, TradeError>;

    /// List trades a trainer participates in (as sender or receiver),
    /// optionally filtered by status, sorted by creation order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_for_trainer(
        &self,
        trainer_id: &TrainerId,
        status: Option<TradeStatus>,
        page: Page,
    ) -> Result<Vec<Trade>, TradeError>;
}
