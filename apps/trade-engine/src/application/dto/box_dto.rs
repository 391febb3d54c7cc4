//! Box DTOs.

use serde::{Deserialize, Serialize};

use crate::application::dto::PokemonDto;
use crate::domain::inventory::aggregate::{Pokemon, PokemonBox};
use crate::domain::shared::Timestamp;

/// A box as presented on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxDto {
    /// Box identifier.
    pub id: String,
    /// Owning trainer.
    pub owner_id: String,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

impl BoxDto {
    /// Build from a domain box.
    #[must_use]
    pub fn from_box(b: &PokemonBox) -> Self {
        Self {
            id: b.id().to_string(),
            owner_id: b.owner_id().to_string(),
            name: b.name().to_string(),
            created_at: b.created_at(),
            updated_at: b.updated_at(),
        }
    }
}

/// A box with its contents, for the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxDetailDto {
    /// The box itself.
    #[serde(flatten)]
    pub summary: BoxDto,
    /// Creatures currently inside, in creation order.
    pub pokemons: Vec<PokemonDto>,
}

impl BoxDetailDto {
    /// Build from a domain box and its contents.
    #[must_use]
    pub fn from_parts(b: &PokemonBox, contents: &[Pokemon]) -> Self {
        Self {
            summary: BoxDto::from_box(b),
            pokemons: contents.iter().map(PokemonDto::from_pokemon).collect(),
        }
    }
}
