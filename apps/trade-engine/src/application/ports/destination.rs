//! Destination policy for incoming traded creatures.
//!
//! When a trade executes, each creature needs a box on the new owner's
//! side. The policy is pluggable; the default routes everything into
//! the trainer's oldest box, which acts as a standing inbox.

use std::sync::Arc;

use async_trait::async_trait;

use super::inventory::InventoryStore;
use crate::domain::inventory::errors::InventoryError;
use crate::domain::shared::{BoxId, TrainerId};

/// Errors from destination resolution.
#[derive(Debug, thiserror::Error)]
pub enum DestinationError {
    /// The trainer owns no box at all. A deployment-level fault: every
    /// registered trainer is provisioned with at least one box.
    #[error("trainer {trainer_id} has no box to receive traded creatures")]
    NoBoxAvailable {
        /// The boxless trainer.
        trainer_id: String,
    },

    /// The inventory store could not be queried.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Chooses the box that receives a creature traded to `trainer_id`.
#[async_trait]
pub trait DestinationPolicy: Send + Sync {
    /// Resolve the destination box for one side of a trade.
    ///
    /// # Errors
    ///
    /// `NoBoxAvailable` if the trainer owns no box, `Inventory` if the
    /// store query fails.
    async fn destination_box(&self, trainer_id: &TrainerId) -> Result<BoxId, DestinationError>;
}

/// Default policy: the trainer's oldest box.
pub struct OldestBoxPolicy<S> {
    store: Arc<S>,
}

impl<S> OldestBoxPolicy<S> {
    /// Create the policy over an inventory store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> DestinationPolicy for OldestBoxPolicy<S>
where
    S: InventoryStore,
{
    async fn destination_box(&self, trainer_id: &TrainerId) -> Result<BoxId, DestinationError> {
        let boxes = self.store.list_boxes(trainer_id).await?;
        boxes
            .first()
            .map(|b| b.id().clone())
            .ok_or_else(|| DestinationError::NoBoxAvailable {
                trainer_id: trainer_id.to_string(),
            })
    }
}
