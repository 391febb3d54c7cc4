//! Respond Trade Use Case
//!
//! The trade executor: the only code path that moves creatures between
//! trainers. Acceptance re-validates ownership from scratch inside the
//! swap transaction, so the proposal-time snapshot is never trusted.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};

use crate::application::ports::{
    DestinationError, DestinationPolicy, InventoryTransfer, PlannedTransfer, SwapError, SwapPlan,
};
use crate::domain::shared::{BoxId, TradeId, TrainerId};
use crate::domain::trading::aggregate::Trade;
use crate::domain::trading::errors::TradeError;
use crate::domain::trading::repository::TradeRepository;
use crate::domain::trading::services::TradeStateMachine;
use crate::domain::trading::value_objects::{TradeDecision, TradeFailureReason, TradeStatus};

/// Striped per-trade locks.
///
/// Serializes concurrent responses to the same trade; distinct trades
/// almost always land on distinct stripes and run in parallel. The
/// repository's compare-and-swap remains the correctness backstop.
pub struct TradeLocks {
    stripes: Vec<Mutex<()>>,
    wait: Duration,
}

impl TradeLocks {
    /// Create a lock set with the given stripe count and bounded wait.
    #[must_use]
    pub fn new(stripes: usize, wait: Duration) -> Self {
        Self {
            stripes: (0..stripes.max(1)).map(|_| Mutex::new(())).collect(),
            wait,
        }
    }

    /// Acquire the stripe for a trade, waiting at most the configured
    /// bound.
    ///
    /// # Errors
    ///
    /// `Conflict` if the stripe stays contended past the bound.
    pub async fn acquire(&self, trade_id: &TradeId) -> Result<MutexGuard<'_, ()>, TradeError> {
        let mut hasher = DefaultHasher::new();
        trade_id.as_str().hash(&mut hasher);
        let index = (hasher.finish() as usize) % self.stripes.len();

        tokio::time::timeout(self.wait, self.stripes[index].lock())
            .await
            .map_err(|_| TradeError::Conflict {
                message: format!("trade {trade_id} is locked by a concurrent response"),
            })
    }
}

/// Use case for accepting or declining a trade.
pub struct RespondTradeUseCase<X, T, D>
where
    X: InventoryTransfer,
    T: TradeRepository,
    D: DestinationPolicy,
{
    transfer: Arc<X>,
    trades: Arc<T>,
    destinations: Arc<D>,
    locks: Arc<TradeLocks>,
}

impl<X, T, D> RespondTradeUseCase<X, T, D>
where
    X: InventoryTransfer,
    T: TradeRepository,
    D: DestinationPolicy,
{
    /// Create a new RespondTradeUseCase.
    pub fn new(transfer: Arc<X>, trades: Arc<T>, destinations: Arc<D>, locks: Arc<TradeLocks>) -> Self {
        Self {
            transfer,
            trades,
            destinations,
            locks,
        }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown trade, `NotReceiver` if the caller is
    /// not the trade's receiver, `AlreadyResolved` when the lifecycle
    /// forbids the decision, `Failed` when the executor declines the
    /// trade, `Conflict` under contention, `Storage` on backend
    /// failure.
    pub async fn execute(
        &self,
        trade_id: &TradeId,
        caller: &TrainerId,
        decision: TradeDecision,
    ) -> Result<Trade, TradeError> {
        let _guard = self.locks.acquire(trade_id).await?;

        let mut trade = self
            .trades
            .find_by_id(trade_id)
            .await?
            .ok_or_else(|| TradeError::NotFound {
                trade_id: trade_id.to_string(),
            })?;

        if !trade.is_receiver(caller) {
            return Err(TradeError::NotReceiver {
                trade_id: trade_id.to_string(),
                caller: caller.to_string(),
            });
        }

        match decision {
            TradeDecision::Decline => self.decline(trade).await,
            TradeDecision::Accept => self.accept(trade).await,
        }
    }

    async fn decline(&self, mut trade: Trade) -> Result<Trade, TradeError> {
        trade.decline_by_receiver()?;
        self.trades.update(&trade).await?;
        trade.bump_version();
        tracing::info!(trade_id = %trade.id(), "trade declined by receiver");
        Ok(trade)
    }

    async fn accept(&self, mut trade: Trade) -> Result<Trade, TradeError> {
        // Accepting an already accepted trade is a no-op: the swap ran
        // exactly once.
        if trade.status() == TradeStatus::Accepted {
            tracing::info!(trade_id = %trade.id(), "accept replay on executed trade");
            return Ok(trade);
        }
        TradeStateMachine::validate_transition(
            trade.id().as_str(),
            trade.status(),
            TradeStatus::Accepted,
            trade.resolution(),
        )?;

        let plan = self.build_plan(&trade).await?;

        match self.transfer.execute_swap(&plan).await {
            Ok(()) => {
                trade.accept()?;
                self.trades.update(&trade).await?;
                trade.bump_version();
                tracing::info!(
                    trade_id = %trade.id(),
                    transfers = plan.transfers.len(),
                    "trade executed"
                );
                Ok(trade)
            }
            Err(SwapError::StaleInventory {
                pokemon_id,
                expected_owner,
            }) => {
                tracing::warn!(
                    trade_id = %trade.id(),
                    pokemon_id,
                    expected_owner,
                    "trade declined: inventory changed since proposal"
                );
                self.record_failure(trade, TradeFailureReason::StaleInventory)
                    .await
            }
            Err(SwapError::Storage(message)) => {
                tracing::error!(trade_id = %trade.id(), error = message, "swap aborted by storage failure");
                self.record_failure(trade, TradeFailureReason::ExecutionError)
                    .await
            }
            // Destination vanished after policy resolution. A fault in
            // the deployment, not in the trade; it stays pending so the
            // accept can be retried once the box exists again.
            Err(SwapError::MissingDestination { box_id }) => Err(TradeError::Storage {
                message: format!("destination box {box_id} does not exist"),
            }),
            Err(SwapError::Conflict(message)) => Err(TradeError::Conflict { message }),
        }
    }

    /// Resolve destination boxes and lay out the transfers for both
    /// sides: offered creatures go to the receiver, wanted creatures to
    /// the sender.
    async fn build_plan(&self, trade: &Trade) -> Result<SwapPlan, TradeError> {
        let to_receiver = self.destination(trade.receiver_id()).await?;
        let to_sender = self.destination(trade.sender_id()).await?;

        let mut transfers = Vec::with_capacity(trade.offered().len() + trade.wanted().len());
        transfers.extend(trade.offered().iter().map(|id| PlannedTransfer {
            pokemon_id: id.clone(),
            expected_owner: trade.sender_id().clone(),
            destination: to_receiver.clone(),
        }));
        transfers.extend(trade.wanted().iter().map(|id| PlannedTransfer {
            pokemon_id: id.clone(),
            expected_owner: trade.receiver_id().clone(),
            destination: to_sender.clone(),
        }));

        Ok(SwapPlan {
            trade_id: trade.id().clone(),
            transfers,
        })
    }

    async fn destination(&self, trainer_id: &TrainerId) -> Result<BoxId, TradeError> {
        self.destinations
            .destination_box(trainer_id)
            .await
            .map_err(|e| match e {
                DestinationError::NoBoxAvailable { .. } => TradeError::Storage {
                    message: e.to_string(),
                },
                DestinationError::Inventory(inner) => TradeError::Storage {
                    message: inner.to_string(),
                },
            })
    }

    /// Decline the trade on the executor's behalf and surface the
    /// failure to the caller. The executor's decline leaves the accept
    /// path retryable.
    async fn record_failure(
        &self,
        mut trade: Trade,
        reason: TradeFailureReason,
    ) -> Result<Trade, TradeError> {
        trade.decline_by_executor(reason)?;
        self.trades.update(&trade).await?;
        Err(TradeError::Failed { reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lock_acquire_is_reentrant_across_trades() {
        let locks = TradeLocks::new(64, Duration::from_millis(50));
        let a = locks.acquire(&TradeId::new("trade-a")).await.unwrap();
        // A different trade maps to a different stripe with high
        // probability at 64 stripes; pick one known not to collide.
        let mut other = None;
        for i in 0..64 {
            let id = TradeId::new(format!("trade-{i}"));
            if let Ok(guard) = locks.acquire(&id).await {
                other = Some(guard);
                break;
            }
        }
        assert!(other.is_some());
        drop(a);
    }

    #[tokio::test]
    async fn contended_stripe_times_out_as_conflict() {
        let locks = TradeLocks::new(1, Duration::from_millis(10));
        let id = TradeId::new("trade-a");
        let _held = locks.acquire(&id).await.unwrap();

        let err = locks.acquire(&TradeId::new("trade-b")).await.unwrap_err();
        assert!(matches!(err, TradeError::Conflict { .. }));
    }
}
