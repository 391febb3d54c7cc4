//! Pokemon aggregate root.
//!
//! A creature always belongs to exactly one box; its owning trainer is
//! derived from that box and never stored here.

use serde::{Deserialize, Serialize};

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::value_objects::{Gender, Level};
use crate::domain::shared::{BoxId, PokemonId, Timestamp};

/// Command to create a new creature inside a box.
#[derive(Debug, Clone)]
pub struct CreatePokemonCommand {
    /// Species identifier (immutable after creation).
    pub species: String,
    /// Display name; defaults to the species when blank.
    pub name: Option<String>,
    /// Level, 1-100.
    pub level: u8,
    /// Gender.
    pub gender: Gender,
    /// Shiny flag.
    pub is_shiny: bool,
    /// Size in meters, if known.
    pub size: Option<f64>,
    /// Weight in kilograms, if known.
    pub weight: Option<f64>,
}

/// Partial update to a creature's mutable attributes.
///
/// `None` fields are left untouched. The species is immutable and the
/// box is changed only through move/transfer operations.
#[derive(Debug, Clone, Default)]
pub struct PokemonPatch {
    /// New display name.
    pub name: Option<String>,
    /// New level.
    pub level: Option<u8>,
    /// New gender.
    pub gender: Option<Gender>,
    /// New shiny flag.
    pub is_shiny: Option<bool>,
    /// New size; `Some(None)` clears the value.
    pub size: Option<Option<f64>>,
    /// New weight; `Some(None)` clears the value.
    pub weight: Option<Option<f64>>,
}

/// A creature instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    id: PokemonId,
    box_id: BoxId,
    species: String,
    name: String,
    level: Level,
    gender: Gender,
    is_shiny: bool,
    size: Option<f64>,
    weight: Option<f64>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Pokemon {
    /// Create a new creature inside the given box.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the species is blank, the level is
    /// outside `[1, 100]`, or size/weight are negative.
    pub fn new(box_id: BoxId, cmd: CreatePokemonCommand) -> Result<Self, InventoryError> {
        let species = cmd.species.trim().to_string();
        if species.is_empty() {
            return Err(InventoryError::validation("species", "must not be empty"));
        }
        let level = Level::new(cmd.level)?;
        let size = validate_measure("size", cmd.size)?;
        let weight = validate_measure("weight", cmd.weight)?;

        // Blank display names fall back to the species.
        let name = match cmd.name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => species.clone(),
        };

        let now = Timestamp::now();
        Ok(Self {
            id: PokemonId::generate(),
            box_id,
            species,
            name,
            level,
            gender: cmd.gender,
            is_shiny: cmd.is_shiny,
            size,
            weight,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get the creature ID.
    #[must_use]
    pub const fn id(&self) -> &PokemonId {
        &self.id
    }

    /// Get the current box.
    #[must_use]
    pub const fn box_id(&self) -> &BoxId {
        &self.box_id
    }

    /// Get the species (immutable).
    #[must_use]
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Get the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Get the gender.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// Whether the creature is shiny.
    #[must_use]
    pub const fn is_shiny(&self) -> bool {
        self.is_shiny
    }

    /// Size in meters, if known.
    #[must_use]
    pub const fn size(&self) -> Option<f64> {
        self.size
    }

    /// Weight in kilograms, if known.
    #[must_use]
    pub const fn weight(&self) -> Option<f64> {
        self.weight
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

    /// Apply a partial update to the mutable attributes.
    ///
    /// # Errors
    ///
    /// Returns a validation error on an out-of-range level, a blank
    /// name, or negative size/weight. Nothing is applied on error.
    pub fn apply_patch(&mut self, patch: PokemonPatch) -> Result<(), InventoryError> {
        // Validate everything before mutating anything.
        let level = patch.level.map(Level::new).transpose()?;
        let name = match &patch.name {
            Some(n) => {
                let trimmed = n.trim();
                if trimmed.is_empty() {
                    return Err(InventoryError::validation("name", "must not be empty"));
                }
                Some(trimmed.to_string())
            }
            None => None,
        };
        let size = match patch.size {
            Some(v) => Some(validate_measure("size", v)?),
            None => None,
        };
        let weight = match patch.weight {
            Some(v) => Some(validate_measure("weight", v)?),
            None => None,
        };

        if let Some(level) = level {
            self.level = level;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(is_shiny) = patch.is_shiny {
            self.is_shiny = is_shiny;
        }
        if let Some(size) = size {
            self.size = size;
        }
        if let Some(weight) = weight {
            self.weight = weight;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Relocate the creature into another box.
    ///
    /// Authorization (same-owner move vs. trade-driven transfer) is
    /// enforced by the inventory store, not here.
    pub fn relocate(&mut self, destination: BoxId) {
        self.box_id = destination;
        self.updated_at = Timestamp::now();
    }
}

fn validate_measure(field: &str, value: Option<f64>) -> Result<Option<f64>, InventoryError> {
    match value {
        Some(v) if v < 0.0 || !v.is_finite() => Err(InventoryError::validation(
            field,
            format!("must be a non-negative number, got {v}"),
        )),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> CreatePokemonCommand {
        CreatePokemonCommand {
            species: "Eevee".to_string(),
            name: None,
            level: 12,
            gender: Gender::Female,
            is_shiny: false,
            size: Some(0.3),
            weight: Some(6.5),
        }
    }

    #[test]
    fn blank_name_defaults_to_species() {
        let pokemon = Pokemon::new(BoxId::new("box-1"), command()).unwrap();
        assert_eq!(pokemon.name(), "Eevee");

        let named = Pokemon::new(
            BoxId::new("box-1"),
            CreatePokemonCommand {
                name: Some("Fluff".to_string()),
                ..command()
            },
        )
        .unwrap();
        assert_eq!(named.name(), "Fluff");
    }

    #[test]
    fn blank_species_rejected() {
        let err = Pokemon::new(
            BoxId::new("box-1"),
            CreatePokemonCommand {
                species: "  ".to_string(),
                ..command()
            },
        )
        .unwrap_err();
        assert!(matches!(err, InventoryError::Validation { ref field, .. } if field == "species"));
    }

    #[test]
    fn out_of_range_level_rejected() {
        let err = Pokemon::new(
            BoxId::new("box-1"),
            CreatePokemonCommand {
                level: 0,
                ..command()
            },
        )
        .unwrap_err();
        assert!(matches!(err, InventoryError::Validation { ref field, .. } if field == "level"));
    }

    #[test]
    fn negative_weight_rejected() {
        let err = Pokemon::new(
            BoxId::new("box-1"),
            CreatePokemonCommand {
                weight: Some(-1.0),
                ..command()
            },
        )
        .unwrap_err();
        assert!(matches!(err, InventoryError::Validation { ref field, .. } if field == "weight"));
    }

    #[test]
    fn patch_applies_all_or_nothing() {
        let mut pokemon = Pokemon::new(BoxId::new("box-1"), command()).unwrap();

        // Invalid level: the valid name in the same patch must not stick.
        let err = pokemon
            .apply_patch(PokemonPatch {
                name: Some("Fluff".to_string()),
                level: Some(200),
                ..PokemonPatch::default()
            })
            .unwrap_err();
        assert!(matches!(err, InventoryError::Validation { .. }));
        assert_eq!(pokemon.name(), "Eevee");
        assert_eq!(pokemon.level().value(), 12);
    }

    #[test]
    fn patch_updates_fields() {
        let mut pokemon = Pokemon::new(BoxId::new("box-1"), command()).unwrap();
        pokemon
            .apply_patch(PokemonPatch {
                level: Some(13),
                is_shiny: Some(true),
                size: Some(None),
                ..PokemonPatch::default()
            })
            .unwrap();

        assert_eq!(pokemon.level().value(), 13);
        assert!(pokemon.is_shiny());
        assert_eq!(pokemon.size(), None);
        // Untouched fields survive.
        assert_eq!(pokemon.gender(), Gender::Female);
        assert_eq!(pokemon.weight(), Some(6.5));
    }

    #[test]
    fn relocate_changes_box_only() {
        let mut pokemon = Pokemon::new(BoxId::new("box-1"), command()).unwrap();
        let id = pokemon.id().clone();
        pokemon.relocate(BoxId::new("box-2"));

        assert_eq!(pokemon.box_id(), &BoxId::new("box-2"));
        assert_eq!(pokemon.id(), &id);
        assert_eq!(pokemon.species(), "Eevee");
    }
}
