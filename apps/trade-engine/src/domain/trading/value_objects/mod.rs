//! Trading value objects.

mod resolution;
mod trade_status;

pub use resolution::{TradeDecision, TradeFailureReason, TradeResolution};
pub use trade_status::TradeStatus;
