//! Creature level value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::inventory::errors::InventoryError;

/// Lowest valid creature level.
pub const MIN_LEVEL: u8 = 1;
/// Highest valid creature level.
pub const MAX_LEVEL: u8 = 100;

/// A creature level, always within `[1, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// Create a level, validating the range.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `value` is outside `[1, 100]`.
    pub fn new(value: u8) -> Result<Self, InventoryError> {
        if (MIN_LEVEL..=MAX_LEVEL).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InventoryError::validation(
                "level",
                format!("must be between {MIN_LEVEL} and {MAX_LEVEL}, got {value}"),
            ))
        }
    }

    /// Get the numeric value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Level {
    type Error = InventoryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1; "minimum")]
    #[test_case(50; "middle")]
    #[test_case(100; "maximum")]
    fn valid_levels(value: u8) {
        assert_eq!(Level::new(value).unwrap().value(), value);
    }

    #[test_case(0; "below range")]
    #[test_case(101; "above range")]
    #[test_case(255; "far above range")]
    fn invalid_levels(value: u8) {
        let err = Level::new(value).unwrap_err();
        assert!(matches!(err, InventoryError::Validation { ref field, .. } if field == "level"));
    }

    #[test]
    fn serde_rejects_out_of_range() {
        let parsed: Result<Level, _> = serde_json::from_str("0");
        assert!(parsed.is_err());

        let parsed: Level = serde_json::from_str("42").unwrap();
        assert_eq!(parsed.value(), 42);
    }
}
