//! Trade State Machine Service
//!
//! Validates trade status transitions.

use crate::domain::trading::errors::TradeError;
use crate::domain::trading::value_objects::{TradeResolution, TradeStatus};

/// Trade state machine for validating transitions.
///
/// States: PROPOSITION (initial), ACCEPTED and DECLINED (terminal).
/// One deliberate exception to terminality: a trade declined by the
/// executor may transition back to ACCEPTED on an accept retry, after
/// the executor re-validates the inventory from scratch.
pub struct TradeStateMachine;

impl TradeStateMachine {
    /// Check if a status transition is valid, given how the trade was
    /// previously resolved (if it was).
    #[must_use]
    pub fn is_valid_transition(
        from: TradeStatus,
        to: TradeStatus,
        resolution: Option<&TradeResolution>,
    ) -> bool {
        match (from, to) {
            (TradeStatus::Proposition, TradeStatus::Accepted | TradeStatus::Declined) => true,
            // Accept retry after an executor decline.
            (TradeStatus::Declined, TradeStatus::Accepted | TradeStatus::Declined) => {
                resolution.is_some_and(TradeResolution::allows_accept_retry)
            }
            _ => false,
        }
    }

    /// Validate a status transition.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyResolved` if the transition is invalid.
    pub fn validate_transition(
        trade_id: &str,
        from: TradeStatus,
        to: TradeStatus,
        resolution: Option<&TradeResolution>,
    ) -> Result<(), TradeError> {
        if Self::is_valid_transition(from, to, resolution) {
            Ok(())
        } else {
            Err(TradeError::AlreadyResolved {
                trade_id: trade_id.to_string(),
                status: from,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trading::value_objects::TradeFailureReason;

    #[test]
    fn pending_can_reach_both_terminals() {
        assert!(TradeStateMachine::is_valid_transition(
            TradeStatus::Proposition,
            TradeStatus::Accepted,
            None
        ));
        assert!(TradeStateMachine::is_valid_transition(
            TradeStatus::Proposition,
            TradeStatus::Declined,
            None
        ));
    }

    #[test]
    fn accepted_is_terminal() {
        assert!(!TradeStateMachine::is_valid_transition(
            TradeStatus::Accepted,
            TradeStatus::Declined,
            None
        ));
        assert!(!TradeStateMachine::is_valid_transition(
            TradeStatus::Accepted,
            TradeStatus::Proposition,
            None
        ));
    }

    #[test]
    fn receiver_decline_is_terminal() {
        assert!(!TradeStateMachine::is_valid_transition(
            TradeStatus::Declined,
            TradeStatus::Accepted,
            Some(&TradeResolution::Receiver)
        ));
    }

    #[test]
    fn executor_decline_allows_accept_retry() {
        let resolution = TradeResolution::Executor {
            reason: TradeFailureReason::StaleInventory,
        };
        assert!(TradeStateMachine::is_valid_transition(
            TradeStatus::Declined,
            TradeStatus::Accepted,
            Some(&resolution)
        ));
    }

    #[test]
    fn validate_transition_reports_already_resolved() {
        let err = TradeStateMachine::validate_transition(
            "trade-1",
            TradeStatus::Accepted,
            TradeStatus::Declined,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, TradeError::AlreadyResolved { .. }));
    }
}
