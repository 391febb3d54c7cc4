//! HTTP request DTOs.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::ports::{PokemonFilter, TrainerFilter};
use crate::domain::inventory::aggregate::{CreatePokemonCommand, PokemonPatch};
use crate::domain::inventory::value_objects::Gender;
use crate::domain::trading::value_objects::TradeStatus;

/// Request to create a box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoxRequest {
    /// Display name.
    pub name: String,
}

/// Request to rename a box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameBoxRequest {
    /// New display name.
    pub name: String,
}

/// Request to register a creature in a box.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePokemonRequest {
    /// Species identifier.
    pub species: String,
    /// Display name; falls back to the species when omitted or blank.
    pub name: Option<String>,
    /// Level, 1 to 100.
    pub level: u8,
    /// Gender code.
    #[serde(default)]
    pub gender_type_code: Gender,
    /// Shiny flag.
    #[serde(default)]
    pub is_shiny: bool,
    /// Size in meters.
    pub size: Option<f64>,
    /// Weight in kilograms.
    pub weight: Option<f64>,
}

impl CreatePokemonRequest {
    /// Convert into the domain command.
    #[must_use]
    pub fn into_command(self) -> CreatePokemonCommand {
        CreatePokemonCommand {
            species: self.species,
            name: self.name,
            level: self.level,
            gender: self.gender_type_code,
            is_shiny: self.is_shiny,
            size: self.size,
            weight: self.weight,
        }
    }
}

/// Distinguishes an absent field from an explicit `null`: absent leaves
/// the attribute untouched, `null` clears it.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Partial update to a creature.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePokemonRequest {
    /// New display name.
    pub name: Option<String>,
    /// New level.
    pub level: Option<u8>,
    /// New gender code.
    pub gender_type_code: Option<Gender>,
    /// New shiny flag.
    pub is_shiny: Option<bool>,
    /// New size; `null` clears the value.
    #[serde(default, deserialize_with = "double_option")]
    pub size: Option<Option<f64>>,
    /// New weight; `null` clears the value.
    #[serde(default, deserialize_with = "double_option")]
    pub weight: Option<Option<f64>>,
}

impl UpdatePokemonRequest {
    /// Convert into the domain patch.
    #[must_use]
    pub fn into_patch(self) -> PokemonPatch {
        PokemonPatch {
            name: self.name,
            level: self.level,
            gender: self.gender_type_code,
            is_shiny: self.is_shiny,
            size: self.size,
            weight: self.weight,
        }
    }
}

/// Request to move a creature into another box of the same trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePokemonRequest {
    /// Destination box.
    pub box_id: String,
}

/// Query parameters for the creature search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonSearchQuery {
    /// Species, exact match.
    pub species: Option<String>,
    /// Name substring.
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
    /// Gender code.
    pub gender: Option<Gender>,
    /// Shiny flag.
    pub is_shiny: Option<bool>,
    /// Zero-based page index.
    pub page: Option<usize>,
    /// Page size, up to 100.
    pub page_size: Option<usize>,
}

impl PokemonSearchQuery {
    /// Convert into the application filter, dropping pagination.
    #[must_use]
    pub fn into_filter(self) -> PokemonFilter {
        PokemonFilter {
            species: self.species,
            name: self.name,
            level_min: self.level_min,
            level_max: self.level_max,
            size_min: self.size_min,
            size_max: self.size_max,
            weight_min: self.weight_min,
            weight_max: self.weight_max,
            gender: self.gender,
            is_shiny: self.is_shiny,
        }
    }
}

/// Query parameters for the trainer search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSearchQuery {
    /// Given-name substring.
    pub first_name: Option<String>,
    /// Family-name substring.
    pub last_name: Option<String>,
    /// Login substring.
    pub login: Option<String>,
    /// Zero-based page index.
    pub page: Option<usize>,
    /// Page size, up to 100.
    pub page_size: Option<usize>,
}

impl TrainerSearchQuery {
    /// Convert into the application filter, dropping pagination.
    #[must_use]
    pub fn into_filter(self) -> TrainerFilter {
        TrainerFilter {
            first_name: self.first_name,
            last_name: self.last_name,
            login: self.login,
        }
    }
}

/// Request to propose a trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposeTradeRequest {
    /// The trainer asked to respond.
    pub receiver_id: String,
    /// Sender-owned creatures on offer.
    pub pokemons_offered_ids: Vec<String>,
    /// Receiver-owned creatures wanted in return.
    pub pokemons_wanted_ids: Vec<String>,
}

/// Query parameters for listing the caller's trades.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeListQuery {
    /// Restrict to one lifecycle status.
    pub status_code: Option<TradeStatus>,
    /// Zero-based page index.
    pub page: Option<usize>,
    /// Page size, up to 100.
    pub page_size: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_null_clears_absent_leaves() {
        let patch: UpdatePokemonRequest =
            serde_json::from_str(r#"{"size": null, "level": 20}"#).unwrap();
        assert_eq!(patch.size, Some(None));
        assert_eq!(patch.weight, None);
        assert_eq!(patch.level, Some(20));
    }

    #[test]
    fn gender_defaults_on_create() {
        let req: CreatePokemonRequest =
            serde_json::from_str(r#"{"species": "Eevee", "level": 5}"#).unwrap();
        assert_eq!(req.gender_type_code, Gender::NotDefined);
        assert!(!req.is_shiny);
    }

    #[test]
    fn search_query_accepts_wire_codes() {
        let query: PokemonSearchQuery =
            serde_json::from_str(r#"{"gender": "FEMALE", "levelMin": 5, "pageSize": 10}"#).unwrap();
        assert_eq!(query.gender, Some(Gender::Female));
        assert_eq!(query.level_min, Some(5));
        assert_eq!(query.page_size, Some(10));
    }
}
