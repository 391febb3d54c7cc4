//! Creature gender value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender of a creature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Genderless or unknown.
    #[default]
    NotDefined,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::NotDefined => "NOT_DEFINED",
        };
        write!(f, "{s}")
    }
}
