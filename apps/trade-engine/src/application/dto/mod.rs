//! Data transfer objects for the API boundary.

pub mod box_dto;
pub mod pokemon_dto;
pub mod trade_dto;

pub use box_dto::{BoxDetailDto, BoxDto};
pub use pokemon_dto::PokemonDto;
pub use trade_dto::TradeDto;
