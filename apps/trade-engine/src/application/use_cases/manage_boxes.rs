//! Box Management Use Case

use std::sync::Arc;

use crate::application::ports::InventoryStore;
use crate::domain::inventory::aggregate::{Pokemon, PokemonBox};
use crate::domain::inventory::errors::InventoryError;
use crate::domain::shared::{BoxId, TrainerId};

/// Use case for creating, renaming, deleting, and reading boxes.
pub struct ManageBoxesUseCase<S>
where
    S: InventoryStore,
{
    store: Arc<S>,
}

impl<S> ManageBoxesUseCase<S>
where
    S: InventoryStore,
{
    /// Create a new ManageBoxesUseCase.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a box for the calling trainer.
    ///
    /// # Errors
    ///
    /// `Validation` if the name is empty.
    pub async fn create(
        &self,
        caller: &TrainerId,
        name: &str,
    ) -> Result<PokemonBox, InventoryError> {
        let created = self.store.create_box(caller, name).await?;
        tracing::info!(box_id = %created.id(), owner = %caller, "box created");
        Ok(created)
    }

    /// Rename a box the caller owns.
    ///
    /// # Errors
    ///
    /// `NotOwner`, `NotFound`, or `Validation`.
    pub async fn rename(
        &self,
        box_id: &BoxId,
        caller: &TrainerId,
        new_name: &str,
    ) -> Result<PokemonBox, InventoryError> {
        let renamed = self.store.rename_box(box_id, caller, new_name).await?;
        tracing::info!(box_id = %box_id, "box renamed");
        Ok(renamed)
    }

    /// Delete a box the caller owns, subject to the deletion policy.
    ///
    /// # Errors
    ///
    /// `NotOwner`, `NotFound`, or `BoxNotEmpty` under the reject policy.
    pub async fn delete(&self, box_id: &BoxId, caller: &TrainerId) -> Result<(), InventoryError> {
        self.store.delete_box(box_id, caller).await?;
        tracing::info!(box_id = %box_id, "box deleted");
        Ok(())
    }

    /// Fetch a box with its contents.
    ///
    /// # Errors
    ///
    /// `NotFound` if the box does not exist.
    pub async fn get(&self, box_id: &BoxId) -> Result<(PokemonBox, Vec<Pokemon>), InventoryError> {
        let found = self
            .store
            .get_box(box_id)
            .await?
            .ok_or_else(|| InventoryError::NotFound {
                entity: "box".to_string(),
                id: box_id.to_string(),
            })?;
        let contents = self.store.list_pokemons_of_box(box_id).await?;
        Ok((found, contents))
    }

    /// List a trainer's boxes in creation order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn list(&self, owner_id: &TrainerId) -> Result<Vec<PokemonBox>, InventoryError> {
        self.store.list_boxes(owner_id).await
    }
}
