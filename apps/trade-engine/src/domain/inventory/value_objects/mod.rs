//! Inventory value objects.

mod gender;
mod level;
mod owned_pokemon;

pub use gender::Gender;
pub use level::{Level, MAX_LEVEL, MIN_LEVEL};
pub use owned_pokemon::OwnedPokemon;
