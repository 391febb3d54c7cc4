//! Trading domain services.

mod trade_state_machine;

pub use trade_state_machine::TradeStateMachine;
