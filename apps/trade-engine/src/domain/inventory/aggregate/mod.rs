//! Inventory aggregates.

mod pokemon;
mod pokemon_box;

pub use pokemon::{CreatePokemonCommand, Pokemon, PokemonPatch};
pub use pokemon_box::PokemonBox;
