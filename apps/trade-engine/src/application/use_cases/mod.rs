//! Application use cases - orchestration of domain logic through ports.

pub mod manage_boxes;
pub mod manage_pokemons;
pub mod propose_trade;
pub mod respond_trade;
pub mod search;
pub mod trade_queries;

pub use manage_boxes::ManageBoxesUseCase;
pub use manage_pokemons::ManagePokemonsUseCase;
pub use propose_trade::ProposeTradeUseCase;
pub use respond_trade::{RespondTradeUseCase, TradeLocks};
pub use search::SearchUseCase;
pub use trade_queries::TradeQueriesUseCase;
