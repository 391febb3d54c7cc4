//! Trading aggregates.

mod trade;

pub use trade::{MAX_TRADE_SIDE, ProposeTradeCommand, Trade};
