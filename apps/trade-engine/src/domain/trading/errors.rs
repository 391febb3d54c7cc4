//! Trade errors.

use std::fmt;

use crate::domain::trading::value_objects::{TradeFailureReason, TradeStatus};

/// Errors that can occur in the trade lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeError {
    /// Malformed proposal, tied to a specific field.
    Validation {
        /// Field with the invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// A referenced creature is not owned by the expected trainer.
    NotOwner {
        /// Creature identifier.
        pokemon_id: String,
        /// The trainer that was expected to own it.
        expected_owner: String,
    },

    /// Caller is not the trade's receiver.
    NotReceiver {
        /// Trade identifier.
        trade_id: String,
        /// The caller that was rejected.
        caller: String,
    },

    /// The trade already reached a terminal state.
    AlreadyResolved {
        /// Trade identifier.
        trade_id: String,
        /// The terminal status.
        status: TradeStatus,
    },

    /// Trade not found.
    NotFound {
        /// Trade identifier.
        trade_id: String,
    },

    /// Concurrent mutation contention; the caller may retry.
    Conflict {
        /// Description of the contention.
        message: String,
    },

    /// The accepted trade could not be executed; it was declined.
    Failed {
        /// Why the executor aborted.
        reason: TradeFailureReason,
    },

    /// Storage backend failure.
    Storage {
        /// Error message.
        message: String,
    },
}

impl TradeError {
    /// Shorthand for a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for TradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { field, message } => {
                write!(f, "invalid value for '{field}': {message}")
            }
            Self::NotOwner {
                pokemon_id,
                expected_owner,
            } => write!(
                f,
                "creature {pokemon_id} is not owned by trainer {expected_owner}"
            ),
            Self::NotReceiver { trade_id, caller } => {
                write!(f, "trainer {caller} is not the receiver of trade {trade_id}")
            }
            Self::AlreadyResolved { trade_id, status } => {
                write!(f, "trade {trade_id} is already {status}")
            }
            Self::NotFound { trade_id } => write!(f, "trade not found: {trade_id}"),
            Self::Conflict { message } => write!(f, "concurrent mutation conflict: {message}"),
            Self::Failed { reason } => write!(f, "trade failed: {reason}"),
            Self::Storage { message } => write!(f, "storage failure: {message}"),
        }
    }
}

impl std::error::Error for TradeError {}
