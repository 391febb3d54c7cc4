//! Trade Query Use Case

use std::sync::Arc;

use crate::domain::shared::{Page, TradeId, TrainerId};
use crate::domain::trading::aggregate::Trade;
use crate::domain::trading::errors::TradeError;
use crate::domain::trading::repository::TradeRepository;
use crate::domain::trading::value_objects::TradeStatus;

/// Read-side access to the trade ledger.
pub struct TradeQueriesUseCase<T>
where
    T: TradeRepository,
{
    trades: Arc<T>,
}

impl<T> TradeQueriesUseCase<T>
where
    T: TradeRepository,
{
    /// Create a new TradeQueriesUseCase.
    pub fn new(trades: Arc<T>) -> Self {
        Self { trades }
    }

    /// Fetch a trade the caller participates in.
    ///
    /// Non-participants get `NotFound`; the ledger does not reveal
    /// other trainers' negotiations.
    ///
    /// # Errors
    ///
    /// `NotFound` or `Storage`.
    pub async fn get(&self, trade_id: &TradeId, caller: &TrainerId) -> Result<Trade, TradeError> {
        let not_found = || TradeError::NotFound {
            trade_id: trade_id.to_string(),
        };
        let trade = self
            .trades
            .find_by_id(trade_id)
            .await?
            .ok_or_else(not_found)?;
        if trade.sender_id() != caller && !trade.is_receiver(caller) {
            return Err(not_found());
        }
        Ok(trade)
    }

    /// List the caller's trades, optionally filtered by status, in
    /// creation order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn list(
        &self,
        caller: &TrainerId,
        status: Option<TradeStatus>,
        page: Page,
    ) -> Result<Vec<Trade>, TradeError> {
        self.trades.list_for_trainer(caller, status, page).await
    }
}
