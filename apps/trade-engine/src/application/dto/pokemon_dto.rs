//! Pokemon DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::inventory::aggregate::Pokemon;
use crate::domain::inventory::value_objects::{Gender, OwnedPokemon};
use crate::domain::shared::Timestamp;

/// A creature as presented on the wire.
///
/// `owner_id` is filled only on read paths that derive the owner; it is
/// never accepted as input, ownership being a function of the box.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDto {
    /// Creature identifier.
    pub id: String,
    /// The box currently holding the creature.
    pub box_id: String,
    /// Derived owning trainer, on read paths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Species name.
    pub species: String,
    /// Display name.
    pub name: String,
    /// Level, 1 to 100.
    pub level: u8,
    /// Gender code.
    pub gender_type_code: Gender,
    /// Shiny flag.
    pub is_shiny: bool,
    /// Size in meters, if measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Weight in kilograms, if measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

impl PokemonDto {
    /// Build from a domain creature, owner unset.
    #[must_use]
    pub fn from_pokemon(p: &Pokemon) -> Self {
        Self {
            id: p.id().to_string(),
            box_id: p.box_id().to_string(),
            owner_id: None,
            species: p.species().to_string(),
            name: p.name().to_string(),
            level: p.level().value(),
            gender_type_code: p.gender(),
            is_shiny: p.is_shiny(),
            size: p.size(),
            weight: p.weight(),
            created_at: p.created_at(),
            updated_at: p.updated_at(),
        }
    }

    /// Build from a creature paired with its derived owner.
    #[must_use]
    pub fn from_owned(owned: &OwnedPokemon) -> Self {
        let mut dto = Self::from_pokemon(&owned.pokemon);
        dto.owner_id = Some(owned.owner_id.to_string());
        dto
    }
}
