//! Trade aggregate root.
//!
//! A trade is a proposal between two trainers over disjoint creature
//! sets. Once terminal it is immutable, with one exception: a trade the
//! executor declined for stale inventory may be re-accepted, which
//! re-validates from scratch.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::shared::{PokemonId, Timestamp, TradeId, TrainerId};
use crate::domain::trading::errors::TradeError;
use crate::domain::trading::value_objects::{TradeFailureReason, TradeResolution, TradeStatus};

/// Largest number of creatures on either side of a trade.
pub const MAX_TRADE_SIDE: usize = 6;

/// Command to propose a new trade.
#[derive(Debug, Clone)]
pub struct ProposeTradeCommand {
    /// The proposing trainer.
    pub sender_id: TrainerId,
    /// The trainer asked to respond.
    pub receiver_id: TrainerId,
    /// Sender-owned creatures on offer, 1-6 items.
    pub offered: Vec<PokemonId>,
    /// Receiver-owned creatures wanted in return, 1-6 items.
    pub wanted: Vec<PokemonId>,
}

impl ProposeTradeCommand {
    /// Validate the command parameters.
    ///
    /// Ownership of the referenced creatures is checked separately
    /// against the inventory store; this validates only the shape.
    ///
    /// # Errors
    ///
    /// Returns error if either set is empty, exceeds 6 items, contains
    /// duplicates, intersects the other set, or the trade is
    /// self-directed.
    pub fn validate(&self) -> Result<(), TradeError> {
        if self.sender_id == self.receiver_id {
            return Err(TradeError::validation(
                "receiver_id",
                "cannot trade with yourself",
            ));
        }
        validate_side("offered", &self.offered)?;
        validate_side("wanted", &self.wanted)?;

        let offered: HashSet<&PokemonId> = self.offered.iter().collect();
        if self.wanted.iter().any(|id| offered.contains(id)) {
            return Err(TradeError::validation(
                "wanted",
                "offered and wanted sets must be disjoint",
            ));
        }
        Ok(())
    }
}

fn validate_side(field: &str, ids: &[PokemonId]) -> Result<(), TradeError> {
    if ids.is_empty() {
        return Err(TradeError::validation(field, "must contain at least 1 creature"));
    }
    if ids.len() > MAX_TRADE_SIDE {
        return Err(TradeError::validation(
            field,
            format!("must contain at most {MAX_TRADE_SIDE} creatures, got {}", ids.len()),
        ));
    }
    let unique: HashSet<&PokemonId> = ids.iter().collect();
    if unique.len() != ids.len() {
        return Err(TradeError::validation(field, "contains duplicate creature ids"));
    }
    Ok(())
}

/// Trade aggregate root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    id: TradeId,
    sender_id: TrainerId,
    receiver_id: TrainerId,
    offered: Vec<PokemonId>,
    wanted: Vec<PokemonId>,
    status: TradeStatus,
    resolution: Option<TradeResolution>,
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Trade {
    /// Create a new trade proposal.
    ///
    /// # Errors
    ///
    /// Returns error if command validation fails.
    pub fn propose(cmd: ProposeTradeCommand) -> Result<Self, TradeError> {
        cmd.validate()?;
        let now = Timestamp::now();
        Ok(Self {
            id: TradeId::generate(),
            sender_id: cmd.sender_id,
            receiver_id: cmd.receiver_id,
            offered: cmd.offered,
            wanted: cmd.wanted,
            status: TradeStatus::Proposition,
            resolution: None,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get the trade ID.
    #[must_use]
    pub const fn id(&self) -> &TradeId {
        &self.id
    }

    /// Get the proposing trainer.
    #[must_use]
    pub const fn sender_id(&self) -> &TrainerId {
        &self.sender_id
    }

    /// Get the responding trainer.
    #[must_use]
    pub const fn receiver_id(&self) -> &TrainerId {
        &self.receiver_id
    }

    /// Creatures the sender put on offer.
    #[must_use]
    pub fn offered(&self) -> &[PokemonId] {
        &self.offered
    }

    /// Creatures the sender wants from the receiver.
    #[must_use]
    pub fn wanted(&self) -> &[PokemonId] {
        &self.wanted
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> TradeStatus {
        self.status
    }

    /// How the trade was resolved, if terminal.
    #[must_use]
    pub const fn resolution(&self) -> Option<&TradeResolution> {
        self.resolution.as_ref()
    }

    /// The executor's failure reason, if it declined this trade.
    #[must_use]
    pub const fn failure_reason(&self) -> Option<TradeFailureReason> {
        match self.resolution {
            Some(TradeResolution::Executor { reason }) => Some(reason),
            _ => None,
        }
    }

    /// Version counter for compare-and-swap persistence.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Check whether a trainer is the receiver of this trade.
    #[must_use]
    pub fn is_receiver(&self, trainer_id: &TrainerId) -> bool {
        &self.receiver_id == trainer_id
    }

    /// Returns true if the accept path may run (or re-run) on this
    /// trade: it is pending, or the executor declined it earlier.
    #[must_use]
    pub fn accept_may_proceed(&self) -> bool {
        self.status.is_pending()
            || self
                .resolution
                .as_ref()
                .is_some_and(TradeResolution::allows_accept_retry)
    }

    /// Mark the trade accepted after the executor swapped ownership.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyResolved` unless the trade is pending or was
    /// declined by the executor (retry path).
    pub fn accept(&mut self) -> Result<(), TradeError> {
        if !self.accept_may_proceed() {
            return Err(self.already_resolved());
        }
        self.status = TradeStatus::Accepted;
        self.resolution = None;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Mark the trade declined by a deliberate receiver decision.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyResolved` if the trade is no longer pending.
    pub fn decline_by_receiver(&mut self) -> Result<(), TradeError> {
        if !self.status.is_pending() {
            return Err(self.already_resolved());
        }
        self.status = TradeStatus::Declined;
        self.resolution = Some(TradeResolution::Receiver);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Mark the trade declined because the executor aborted it.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyResolved` unless the accept path was allowed to
    /// run on this trade.
    pub fn decline_by_executor(&mut self, reason: TradeFailureReason) -> Result<(), TradeError> {
        if !self.accept_may_proceed() {
            return Err(self.already_resolved());
        }
        self.status = TradeStatus::Declined;
        self.resolution = Some(TradeResolution::Executor { reason });
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Bump the version counter. Called by repositories on successful
    /// compare-and-swap updates.
    pub fn bump_version(&mut self) {
        self.version += 1;
    }

    fn already_resolved(&self) -> TradeError {
        TradeError::AlreadyResolved {
            trade_id: self.id.as_str().to_string(),
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(prefix: &str, n: usize) -> Vec<PokemonId> {
        (0..n).map(|i| PokemonId::new(format!("{prefix}-{i}"))).collect()
    }

    fn command() -> ProposeTradeCommand {
        ProposeTradeCommand {
            sender_id: TrainerId::new("sender"),
            receiver_id: TrainerId::new("receiver"),
            offered: ids("offer", 2),
            wanted: ids("want", 1),
        }
    }

    #[test]
    fn propose_starts_pending() {
        let trade = Trade::propose(command()).unwrap();
        assert_eq!(trade.status(), TradeStatus::Proposition);
        assert!(trade.resolution().is_none());
        assert_eq!(trade.version(), 0);
    }

    #[test]
    fn empty_side_rejected() {
        let err = Trade::propose(ProposeTradeCommand {
            offered: vec![],
            ..command()
        })
        .unwrap_err();
        assert!(matches!(err, TradeError::Validation { ref field, .. } if field == "offered"));
    }

    #[test]
    fn oversized_side_rejected() {
        let err = Trade::propose(ProposeTradeCommand {
            wanted: ids("want", 7),
            ..command()
        })
        .unwrap_err();
        assert!(matches!(err, TradeError::Validation { ref field, .. } if field == "wanted"));
    }

    #[test]
    fn overlapping_sides_rejected() {
        let shared = PokemonId::new("shared");
        let err = Trade::propose(ProposeTradeCommand {
            offered: vec![shared.clone()],
            wanted: vec![shared],
            ..command()
        })
        .unwrap_err();
        assert!(matches!(err, TradeError::Validation { .. }));
    }

    #[test]
    fn duplicate_ids_within_side_rejected() {
        let dup = PokemonId::new("dup");
        let err = Trade::propose(ProposeTradeCommand {
            offered: vec![dup.clone(), dup],
            ..command()
        })
        .unwrap_err();
        assert!(matches!(err, TradeError::Validation { .. }));
    }

    #[test]
    fn self_trade_rejected() {
        let err = Trade::propose(ProposeTradeCommand {
            receiver_id: TrainerId::new("sender"),
            ..command()
        })
        .unwrap_err();
        assert!(matches!(err, TradeError::Validation { ref field, .. } if field == "receiver_id"));
    }

    #[test]
    fn accept_from_pending() {
        let mut trade = Trade::propose(command()).unwrap();
        trade.accept().unwrap();
        assert_eq!(trade.status(), TradeStatus::Accepted);
    }

    #[test]
    fn decline_by_receiver_is_final() {
        let mut trade = Trade::propose(command()).unwrap();
        trade.decline_by_receiver().unwrap();

        assert_eq!(trade.status(), TradeStatus::Declined);
        assert_eq!(trade.resolution(), Some(&TradeResolution::Receiver));
        assert!(!trade.accept_may_proceed());
        assert!(matches!(trade.accept(), Err(TradeError::AlreadyResolved { .. })));
    }

    #[test]
    fn executor_decline_keeps_accept_retryable() {
        let mut trade = Trade::propose(command()).unwrap();
        trade
            .decline_by_executor(TradeFailureReason::StaleInventory)
            .unwrap();

        assert_eq!(trade.status(), TradeStatus::Declined);
        assert_eq!(trade.failure_reason(), Some(TradeFailureReason::StaleInventory));
        assert!(trade.accept_may_proceed());

        trade.accept().unwrap();
        assert_eq!(trade.status(), TradeStatus::Accepted);
        assert!(trade.resolution().is_none());
    }

    #[test]
    fn decline_after_accept_rejected() {
        let mut trade = Trade::propose(command()).unwrap();
        trade.accept().unwrap();
        assert!(matches!(
            trade.decline_by_receiver(),
            Err(TradeError::AlreadyResolved { .. })
        ));
    }
}
