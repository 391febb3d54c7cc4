//! Trade status in the lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    /// Proposed, awaiting the receiver's response.
    Proposition,
    /// Accepted by the receiver; ownership has been swapped.
    Accepted,
    /// Declined, either deliberately by the receiver or by the executor.
    Declined,
}

impl TradeStatus {
    /// Returns true if the trade reached a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Declined)
    }

    /// Returns true if the trade still awaits a response.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Proposition)
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Proposition => "PROPOSITION",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
        };
        write!(f, "{s}")
    }
}
