//! How a trade reached its terminal state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The receiver's decision on a pending trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDecision {
    /// Accept the trade and swap ownership.
    Accept,
    /// Decline the trade.
    Decline,
}

/// Why the executor aborted an accepted trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeFailureReason {
    /// One or more referenced creatures changed ownership or were
    /// deleted since proposal. Recoverable: re-propose with fresh ids.
    StaleInventory,
    /// Storage-layer failure during the atomic transfer. Reported, not
    /// retried automatically.
    ExecutionError,
}

impl TradeFailureReason {
    /// Wire code for API responses.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::StaleInventory => "STALE_INVENTORY",
            Self::ExecutionError => "EXECUTION_ERROR",
        }
    }
}

impl fmt::Display for TradeFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleInventory => write!(f, "stale inventory"),
            Self::ExecutionError => write!(f, "execution error"),
        }
    }
}

/// Internal marker distinguishing how a DECLINED trade was declined.
///
/// Surfaced to callers only as a reason code; an executor decline keeps
/// the accept path retryable, a receiver decline is permanently final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "by")]
pub enum TradeResolution {
    /// The receiver responded deliberately.
    Receiver,
    /// The executor aborted the accepted trade.
    Executor {
        /// Why the executor aborted.
        reason: TradeFailureReason,
    },
}

impl TradeResolution {
    /// Returns true if the accept path may be retried after this
    /// resolution (executor declines re-validate from scratch).
    #[must_use]
    pub const fn allows_accept_retry(&self) -> bool {
        matches!(self, Self::Executor { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_reason_codes() {
        assert_eq!(TradeFailureReason::StaleInventory.code(), "STALE_INVENTORY");
        assert_eq!(TradeFailureReason::ExecutionError.code(), "EXECUTION_ERROR");
    }

    #[test]
    fn executor_resolution_is_retryable() {
        let by_executor = TradeResolution::Executor {
            reason: TradeFailureReason::StaleInventory,
        };
        assert!(by_executor.allows_accept_retry());
        assert!(!TradeResolution::Receiver.allows_accept_retry());
    }

    #[test]
    fn decision_serde() {
        let parsed: TradeDecision = serde_json::from_str("\"ACCEPT\"").unwrap();
        assert_eq!(parsed, TradeDecision::Accept);
    }
}
