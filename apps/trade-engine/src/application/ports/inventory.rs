//! Inventory store ports.
//!
//! `InventoryStore` is the caller-facing port: every operation takes an
//! explicit caller id and enforces ownership. `InventoryTransfer` is the
//! privileged port that changes a creature's owning trainer; it is wired
//! only into the trade executor and is deliberately unreachable from the
//! HTTP layer.

use async_trait::async_trait;

use crate::domain::inventory::aggregate::{CreatePokemonCommand, Pokemon, PokemonBox, PokemonPatch};
use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::value_objects::{Gender, OwnedPokemon};
use crate::domain::shared::{BoxId, Page, PokemonId, TradeId, TrainerId};

/// Filter for paginated creature searches.
///
/// All fields are optional; an empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct PokemonFilter {
    /// Exact species match, case-insensitive.
    pub species: Option<String>,
    /// Display-name substring, case-insensitive.
    pub name: Option<String>,
    /// Inclusive lower level bound.
    pub level_min: Option<u8>,
    /// Inclusive upper level bound.
    pub level_max: Option<u8>,
    /// Inclusive lower size bound.
    pub size_min: Option<f64>,
    /// Inclusive upper size bound.
    pub size_max: Option<f64>,
    /// Inclusive lower weight bound.
    pub weight_min: Option<f64>,
    /// Inclusive upper weight bound.
    pub weight_max: Option<f64>,
    /// Gender match.
    pub gender: Option<Gender>,
    /// Shiny flag match.
    pub is_shiny: Option<bool>,
}

impl PokemonFilter {
    /// Check whether a creature satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        if let Some(species) = &self.species
            && !pokemon.species().eq_ignore_ascii_case(species)
        {
            return false;
        }
        if let Some(name) = &self.name
            && !pokemon
                .name()
                .to_lowercase()
                .contains(&name.to_lowercase())
        {
            return false;
        }
        let level = pokemon.level().value();
        if self.level_min.is_some_and(|min| level < min) {
            return false;
        }
        if self.level_max.is_some_and(|max| level > max) {
            return false;
        }
        if !range_matches(pokemon.size(), self.size_min, self.size_max) {
            return false;
        }
        if !range_matches(pokemon.weight(), self.weight_min, self.weight_max) {
            return false;
        }
        if self.gender.is_some_and(|g| g != pokemon.gender()) {
            return false;
        }
        if self.is_shiny.is_some_and(|s| s != pokemon.is_shiny()) {
            return false;
        }
        true
    }
}

/// A bounded optional measure matches only when present and in range.
fn range_matches(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(v) = value else { return false };
    min.is_none_or(|m| v >= m) && max.is_none_or(|m| v <= m)
}

/// Caller-facing inventory port.
///
/// Every mutation is a single atomic unit: no partially applied state
/// is ever observable, and mutations on the same row serialize. Under
/// lock contention an operation fails with `Conflict` after a bounded
/// wait rather than blocking indefinitely.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Create a box owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// `Validation` if the name is empty after trimming.
    async fn create_box(
        &self,
        owner_id: &TrainerId,
        name: &str,
    ) -> Result<PokemonBox, InventoryError>;

    /// Rename a box.
    ///
    /// # Errors
    ///
    /// `NotOwner` if the caller does not own the box; `Validation` on an
    /// empty name.
    async fn rename_box(
        &self,
        box_id: &BoxId,
        caller_id: &TrainerId,
        new_name: &str,
    ) -> Result<PokemonBox, InventoryError>;

    /// Delete a box.
    ///
    /// The configured deletion policy decides what happens to a
    /// non-empty box: reject (`BoxNotEmpty`) or cascade-delete the
    /// creatures inside.
    ///
    /// # Errors
    ///
    /// `NotOwner`, `NotFound`, or `BoxNotEmpty` under the reject policy.
    async fn delete_box(&self, box_id: &BoxId, caller_id: &TrainerId)
    -> Result<(), InventoryError>;

    /// Fetch a box by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn get_box(&self, box_id: &BoxId) -> Result<Option<PokemonBox>, InventoryError>;

    /// List a trainer's boxes in creation order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_boxes(&self, owner_id: &TrainerId) -> Result<Vec<PokemonBox>, InventoryError>;

    /// Create a creature inside a box the caller owns.
    ///
    /// # Errors
    ///
    /// `NotOwner` if the caller does not own the target box;
    /// `Validation` on bad attributes.
    async fn create_pokemon(
        &self,
        box_id: &BoxId,
        caller_id: &TrainerId,
        cmd: CreatePokemonCommand,
    ) -> Result<Pokemon, InventoryError>;

    /// Apply a partial update to a creature the caller owns.
    ///
    /// # Errors
    ///
    /// `NotOwner`, `NotFound`, or `Validation`.
    async fn update_pokemon(
        &self,
        pokemon_id: &PokemonId,
        caller_id: &TrainerId,
        patch: PokemonPatch,
    ) -> Result<Pokemon, InventoryError>;

    /// Move a creature into a different box of the same trainer.
    ///
    /// The caller must own both the creature's current box and the
    /// destination box; this operation never changes the owning
    /// trainer.
    ///
    /// # Errors
    ///
    /// `NotOwner`, `NotFound`, or `Conflict` under contention.
    async fn move_pokemon(
        &self,
        pokemon_id: &PokemonId,
        caller_id: &TrainerId,
        destination: &BoxId,
    ) -> Result<Pokemon, InventoryError>;

    /// Delete a creature the caller owns.
    ///
    /// # Errors
    ///
    /// `NotOwner` or `NotFound`.
    async fn delete_pokemon(
        &self,
        pokemon_id: &PokemonId,
        caller_id: &TrainerId,
    ) -> Result<(), InventoryError>;

    /// Fetch a creature together with its derived owner.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn get_pokemon(
        &self,
        pokemon_id: &PokemonId,
    ) -> Result<Option<OwnedPokemon>, InventoryError>;

    /// List the creatures inside a box, in creation order.
    ///
    /// # Errors
    ///
    /// `NotFound` if the box does not exist.
    async fn list_pokemons_of_box(&self, box_id: &BoxId) -> Result<Vec<Pokemon>, InventoryError>;

    /// List every creature a trainer owns, across boxes, in creation
    /// order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_pokemons_of_trainer(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Vec<OwnedPokemon>, InventoryError>;

    /// Paginated filtered creature search, sorted by creation order.
    ///
    /// Runs at weaker isolation than mutations: concurrent writes may
    /// shift records across adjacent page fetches.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn search_pokemons(
        &self,
        filter: &PokemonFilter,
        page: Page,
    ) -> Result<Vec<OwnedPokemon>, InventoryError>;
}

/// One planned ownership transfer inside a swap.
#[derive(Debug, Clone)]
pub struct PlannedTransfer {
    /// The creature to transfer.
    pub pokemon_id: PokemonId,
    /// The trainer expected to own it right now; the swap aborts if
    /// this no longer holds.
    pub expected_owner: TrainerId,
    /// The new owner's destination box.
    pub destination: BoxId,
}

/// A full trade swap: every transfer applies, or none do.
#[derive(Debug, Clone)]
pub struct SwapPlan {
    /// The trade this swap executes, for logging and diagnostics.
    pub trade_id: TradeId,
    /// The planned transfers, both directions of the trade.
    pub transfers: Vec<PlannedTransfer>,
}

/// Errors from the privileged swap path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwapError {
    /// A referenced creature was deleted or changed owner since
    /// proposal. Nothing was moved.
    #[error("creature {pokemon_id} is no longer owned by trainer {expected_owner}")]
    StaleInventory {
        /// The creature that failed validation.
        pokemon_id: String,
        /// The owner the plan expected.
        expected_owner: String,
    },

    /// A destination box disappeared between policy resolution and the
    /// swap. A configuration-level fault, not a user-facing trade
    /// failure.
    #[error("destination box {box_id} does not exist")]
    MissingDestination {
        /// The missing box.
        box_id: String,
    },

    /// Lock contention; the whole accept may be retried.
    #[error("swap aborted by lock contention: {0}")]
    Conflict(String),

    /// Storage backend failure during the transfer.
    #[error("storage failure during swap: {0}")]
    Storage(String),
}

/// Privileged transfer port.
///
/// The only path by which a creature's owning trainer changes. Handed
/// exclusively to the trade executor; never exposed through the API.
#[async_trait]
pub trait InventoryTransfer: Send + Sync {
    /// Validate and apply a swap as a single atomic unit.
    ///
    /// Re-validates every expectation inside the same transaction that
    /// performs the transfers, closing the gap between the ledger's
    /// snapshot check at proposal time and execution.
    ///
    /// # Errors
    ///
    /// `StaleInventory` if any expectation fails (nothing is moved),
    /// `MissingDestination` if a destination box is gone, `Conflict`
    /// under lock contention, `Storage` on backend failure.
    async fn execute_swap(&self, plan: &SwapPlan) -> Result<(), SwapError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::aggregate::CreatePokemonCommand;

    fn pokemon(level: u8, shiny: bool) -> Pokemon {
        Pokemon::new(
            BoxId::new("box-1"),
            CreatePokemonCommand {
                species: "Pikachu".to_string(),
                name: Some("Sparky".to_string()),
                level,
                gender: Gender::Male,
                is_shiny: shiny,
                size: Some(0.4),
                weight: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(PokemonFilter::default().matches(&pokemon(10, false)));
    }

    #[test]
    fn species_filter_is_case_insensitive() {
        let filter = PokemonFilter {
            species: Some("pikachu".to_string()),
            ..PokemonFilter::default()
        };
        assert!(filter.matches(&pokemon(10, false)));

        let other = PokemonFilter {
            species: Some("Eevee".to_string()),
            ..PokemonFilter::default()
        };
        assert!(!other.matches(&pokemon(10, false)));
    }

    #[test]
    fn name_filter_is_substring() {
        let filter = PokemonFilter {
            name: Some("park".to_string()),
            ..PokemonFilter::default()
        };
        assert!(filter.matches(&pokemon(10, false)));
    }

    #[test]
    fn level_range_is_inclusive() {
        let filter = PokemonFilter {
            level_min: Some(10),
            level_max: Some(10),
            ..PokemonFilter::default()
        };
        assert!(filter.matches(&pokemon(10, false)));
        assert!(!filter.matches(&pokemon(11, false)));
        assert!(!filter.matches(&pokemon(9, false)));
    }

    #[test]
    fn missing_measure_fails_range_filter() {
        // Weight is unset on the fixture; a weight-bounded filter must
        // not match it.
        let filter = PokemonFilter {
            weight_min: Some(1.0),
            ..PokemonFilter::default()
        };
        assert!(!filter.matches(&pokemon(10, false)));

        let size_filter = PokemonFilter {
            size_max: Some(1.0),
            ..PokemonFilter::default()
        };
        assert!(size_filter.matches(&pokemon(10, false)));
    }

    #[test]
    fn shiny_filter() {
        let filter = PokemonFilter {
            is_shiny: Some(true),
            ..PokemonFilter::default()
        };
        assert!(filter.matches(&pokemon(10, true)));
        assert!(!filter.matches(&pokemon(10, false)));
    }
}
