//! Inventory errors.

use std::fmt;

/// Errors that can occur in inventory operations.
///
/// Every variant is recoverable from the caller's perspective; only
/// `Storage` reports a backend failure for the request in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Malformed input, tied to a specific field.
    Validation {
        /// Field with the invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// Caller does not own the targeted entity.
    NotOwner {
        /// Entity type (e.g., "box").
        entity: String,
        /// Entity identifier.
        id: String,
        /// The caller that was rejected.
        caller: String,
    },

    /// Entity not found.
    NotFound {
        /// Entity type.
        entity: String,
        /// Entity identifier.
        id: String,
    },

    /// Deleting the box would orphan the creatures inside it.
    BoxNotEmpty {
        /// Box identifier.
        box_id: String,
        /// Number of creatures still inside.
        occupants: usize,
    },

    /// Concurrent mutation contention; the caller may retry.
    Conflict {
        /// Description of the contention.
        message: String,
    },

    /// Storage backend failure.
    Storage {
        /// Error message.
        message: String,
    },
}

impl InventoryError {
    /// Shorthand for a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { field, message } => {
                write!(f, "invalid value for '{field}': {message}")
            }
            Self::NotOwner { entity, id, caller } => {
                write!(f, "trainer {caller} does not own {entity} {id}")
            }
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::BoxNotEmpty { box_id, occupants } => {
                write!(f, "box {box_id} still holds {occupants} creature(s)")
            }
            Self::Conflict { message } => write!(f, "concurrent mutation conflict: {message}"),
            Self::Storage { message } => write!(f, "storage failure: {message}"),
        }
    }
}

impl std::error::Error for InventoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display() {
        let err = InventoryError::validation("level", "must be between 1 and 100");
        let msg = format!("{err}");
        assert!(msg.contains("level"));
        assert!(msg.contains("between 1 and 100"));
    }

    #[test]
    fn not_owner_display() {
        let err = InventoryError::NotOwner {
            entity: "box".to_string(),
            id: "box-1".to_string(),
            caller: "trainer-2".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("box-1"));
        assert!(msg.contains("trainer-2"));
    }

    #[test]
    fn box_not_empty_display() {
        let err = InventoryError::BoxNotEmpty {
            box_id: "box-1".to_string(),
            occupants: 3,
        };
        assert!(format!("{err}").contains('3'));
    }

    #[test]
    fn is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(InventoryError::Conflict {
            message: "lock wait timed out".to_string(),
        });
        assert!(!err.to_string().is_empty());
    }
}
