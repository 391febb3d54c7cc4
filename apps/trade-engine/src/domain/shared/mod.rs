//! Shared kernel - value objects common to inventory and trading.

pub mod value_objects;

pub use value_objects::{BoxId, MAX_PAGE_SIZE, Page, PageError, PokemonId, Timestamp, TradeId, TrainerId};
