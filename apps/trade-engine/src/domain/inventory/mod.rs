//! Inventory bounded context.
//!
//! Single source of truth for box/creature ownership. The core
//! invariant: every creature belongs to exactly one box, and that box
//! belongs to exactly one trainer. A creature's owning trainer is always
//! derived from its current box, never stored independently.

pub mod aggregate;
pub mod errors;
pub mod value_objects;

pub use aggregate::{CreatePokemonCommand, Pokemon, PokemonBox, PokemonPatch};
pub use errors::InventoryError;
pub use value_objects::{Gender, Level, OwnedPokemon};
