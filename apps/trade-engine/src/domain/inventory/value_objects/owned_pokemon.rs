//! Read model pairing a creature with its derived owner.

use serde::{Deserialize, Serialize};

use crate::domain::inventory::aggregate::Pokemon;
use crate::domain::shared::TrainerId;

/// A creature together with the trainer derived from its current box.
///
/// The owning trainer is never stored on the creature itself; readers
/// that need it receive this pairing, computed at query time from the
/// box relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedPokemon {
    /// The creature.
    pub pokemon: Pokemon,
    /// Owner of the creature's current box.
    pub owner_id: TrainerId,
}

impl OwnedPokemon {
    /// Pair a creature with its box's owner.
    #[must_use]
    pub const fn new(pokemon: Pokemon, owner_id: TrainerId) -> Self {
        Self { pokemon, owner_id }
    }
}
