//! Pokemon Management Use Case

use std::sync::Arc;

use crate::application::ports::InventoryStore;
use crate::domain::inventory::aggregate::{CreatePokemonCommand, Pokemon, PokemonPatch};
use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::value_objects::OwnedPokemon;
use crate::domain::shared::{BoxId, PokemonId, TrainerId};

/// Use case for managing creatures within a trainer's own boxes.
///
/// None of these operations can change the owning trainer; ownership
/// transfer happens only inside trade execution.
pub struct ManagePokemonsUseCase<S>
where
    S: InventoryStore,
{
    store: Arc<S>,
}

impl<S> ManagePokemonsUseCase<S>
where
    S: InventoryStore,
{
    /// Create a new ManagePokemonsUseCase.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a creature inside a box the caller owns.
    ///
    /// # Errors
    ///
    /// `NotOwner`, `NotFound`, or `Validation`.
    pub async fn create(
        &self,
        box_id: &BoxId,
        caller: &TrainerId,
        cmd: CreatePokemonCommand,
    ) -> Result<Pokemon, InventoryError> {
        let created = self.store.create_pokemon(box_id, caller, cmd).await?;
        tracing::info!(
            pokemon_id = %created.id(),
            box_id = %box_id,
            species = created.species(),
            "creature registered"
        );
        Ok(created)
    }

    /// Apply a partial update to a creature the caller owns.
    ///
    /// # Errors
    ///
    /// `NotOwner`, `NotFound`, or `Validation`. On validation failure
    /// no field is changed.
    pub async fn update(
        &self,
        pokemon_id: &PokemonId,
        caller: &TrainerId,
        patch: PokemonPatch,
    ) -> Result<Pokemon, InventoryError> {
        let updated = self.store.update_pokemon(pokemon_id, caller, patch).await?;
        tracing::info!(pokemon_id = %pokemon_id, "creature updated");
        Ok(updated)
    }

    /// Move a creature between two boxes of the calling trainer.
    ///
    /// # Errors
    ///
    /// `NotOwner` if the caller owns either box only partially,
    /// `NotFound`, or `Conflict` under contention.
    pub async fn relocate(
        &self,
        pokemon_id: &PokemonId,
        caller: &TrainerId,
        destination: &BoxId,
    ) -> Result<Pokemon, InventoryError> {
        let moved = self
            .store
            .move_pokemon(pokemon_id, caller, destination)
            .await?;
        tracing::info!(pokemon_id = %pokemon_id, destination = %destination, "creature moved");
        Ok(moved)
    }

    /// Release a creature the caller owns.
    ///
    /// # Errors
    ///
    /// `NotOwner` or `NotFound`.
    pub async fn delete(
        &self,
        pokemon_id: &PokemonId,
        caller: &TrainerId,
    ) -> Result<(), InventoryError> {
        self.store.delete_pokemon(pokemon_id, caller).await?;
        tracing::info!(pokemon_id = %pokemon_id, "creature released");
        Ok(())
    }

    /// Fetch a creature with its derived owner.
    ///
    /// # Errors
    ///
    /// `NotFound` if the creature does not exist.
    pub async fn get(&self, pokemon_id: &PokemonId) -> Result<OwnedPokemon, InventoryError> {
        self.store
            .get_pokemon(pokemon_id)
            .await?
            .ok_or_else(|| InventoryError::NotFound {
                entity: "pokemon".to_string(),
                id: pokemon_id.to_string(),
            })
    }
}
