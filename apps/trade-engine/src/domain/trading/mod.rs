//! Trading bounded context.
//!
//! The trade ledger: proposals, the accept/decline state machine, and
//! the failure semantics of trade execution. Creatures are referenced
//! by id; the inventory context owns their actual location.

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{MAX_TRADE_SIDE, ProposeTradeCommand, Trade};
pub use errors::TradeError;
pub use repository::TradeRepository;
pub use services::TradeStateMachine;
pub use value_objects::{TradeDecision, TradeFailureReason, TradeResolution, TradeStatus};
