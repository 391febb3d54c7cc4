//! Propose Trade Use Case

use std::sync::Arc;

use crate::application::ports::{IdentityDirectory, InventoryStore};
use crate::domain::shared::{PokemonId, TrainerId};
use crate::domain::trading::aggregate::{ProposeTradeCommand, Trade};
use crate::domain::trading::errors::TradeError;
use crate::domain::trading::repository::TradeRepository;

/// Use case for proposing a trade.
///
/// Ownership of the referenced creatures is checked against a snapshot
/// of the inventory at proposal time; the authoritative re-check happens
/// inside the executor when the trade is accepted.
pub struct ProposeTradeUseCase<S, I, T>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
{
    store: Arc<S>,
    identity: Arc<I>,
    trades: Arc<T>,
}

impl<S, I, T> ProposeTradeUseCase<S, I, T>
where
    S: InventoryStore,
    I: IdentityDirectory,
    T: TradeRepository,
{
    /// Create a new ProposeTradeUseCase.
    pub fn new(store: Arc<S>, identity: Arc<I>, trades: Arc<T>) -> Self {
        Self {
            store,
            identity,
            trades,
        }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// `Validation` on a malformed command or unknown receiver,
    /// `NotOwner` if a referenced creature is not held by the expected
    /// trainer, `Storage` on backend failure.
    pub async fn execute(&self, cmd: ProposeTradeCommand) -> Result<Trade, TradeError> {
        cmd.validate()?;

        let receiver = self
            .identity
            .find(&cmd.receiver_id)
            .await
            .map_err(|e| TradeError::Storage {
                message: e.to_string(),
            })?;
        if receiver.is_none() {
            return Err(TradeError::validation("receiver_id", "unknown trainer"));
        }

        self.check_ownership(&cmd.offered, &cmd.sender_id).await?;
        self.check_ownership(&cmd.wanted, &cmd.receiver_id).await?;

        let trade = Trade::propose(cmd)?;
        self.trades.insert(&trade).await?;

        tracing::info!(
            trade_id = %trade.id(),
            sender = %trade.sender_id(),
            receiver = %trade.receiver_id(),
            offered = trade.offered().len(),
            wanted = trade.wanted().len(),
            "trade proposed"
        );
        Ok(trade)
    }

    /// Verify that every creature in `ids` is currently held by
    /// `expected`.
    async fn check_ownership(
        &self,
        ids: &[PokemonId],
        expected: &TrainerId,
    ) -> Result<(), TradeError> {
        for id in ids {
            let owned = self
                .store
                .get_pokemon(id)
                .await
                .map_err(|e| TradeError::Storage {
                    message: e.to_string(),
                })?;
            match owned {
                Some(found) if found.owner_id == *expected => {}
                _ => {
                    return Err(TradeError::NotOwner {
                        pokemon_id: id.to_string(),
                        expected_owner: expected.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
