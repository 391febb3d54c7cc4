//! Shared value objects used across bounded contexts.

mod identifiers;
mod page;
mod timestamp;

pub use identifiers::{BoxId, PokemonId, TradeId, TrainerId};
pub use page::{MAX_PAGE_SIZE, Page, PageError};
pub use timestamp::Timestamp;
