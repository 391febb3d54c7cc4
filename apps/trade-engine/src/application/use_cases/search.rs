//! Search Use Case
//!
//! Public read side: creature search and trainer lookups. Reads run at
//! weaker isolation than mutations, so a page fetched while writes are
//! in flight may miss a record that moved; the sort key keeps pages
//! stable against everything except those moves.

use std::sync::Arc;

use crate::application::ports::{
    IdentityDirectory, IdentityError, InventoryStore, PokemonFilter, Trainer, TrainerFilter,
};
use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::value_objects::OwnedPokemon;
use crate::domain::shared::{Page, TrainerId};

/// Use case for searching creatures and trainers.
pub struct SearchUseCase<S, I>
where
    S: InventoryStore,
    I: IdentityDirectory,
{
    store: Arc<S>,
    identity: Arc<I>,
}

impl<S, I> SearchUseCase<S, I>
where
    S: InventoryStore,
    I: IdentityDirectory,
{
    /// Create a new SearchUseCase.
    pub fn new(store: Arc<S>, identity: Arc<I>) -> Self {
        Self { store, identity }
    }

    /// Paginated filtered creature search across all trainers.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn pokemons(
        &self,
        filter: &PokemonFilter,
        page: Page,
    ) -> Result<Vec<OwnedPokemon>, InventoryError> {
        self.store.search_pokemons(filter, page).await
    }

    /// Paginated trainer search.
    ///
    /// # Errors
    ///
    /// `Unavailable` when the directory cannot answer.
    pub async fn trainers(
        &self,
        filter: &TrainerFilter,
        page: Page,
    ) -> Result<Vec<Trainer>, IdentityError> {
        self.identity.search(filter, page).await
    }

    /// A trainer's public profile with every creature they hold.
    ///
    /// # Errors
    ///
    /// `Unavailable` when the directory cannot answer; `Ok(None)` for an
    /// unknown trainer.
    pub async fn trainer_profile(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Option<(Trainer, Vec<OwnedPokemon>)>, IdentityError> {
        let Some(trainer) = self.identity.find(trainer_id).await? else {
            return Ok(None);
        };
        let pokemons = self
            .store
            .list_pokemons_of_trainer(trainer_id)
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
        Ok(Some((trainer, pokemons)))
    }
}
