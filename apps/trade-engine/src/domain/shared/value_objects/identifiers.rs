//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up IDs from different contexts.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Generate a new unique identifier using UUID v4.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(TrainerId, "Unique identifier for a trainer (identity anchor).");
define_id!(BoxId, "Unique identifier for a creature box.");
define_id!(PokemonId, "Unique identifier for a creature instance.");
define_id!(TradeId, "Unique identifier for a trade proposal.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trainer_id_new_and_display() {
        let id = TrainerId::new("trainer-123");
        assert_eq!(id.as_str(), "trainer-123");
        assert_eq!(format!("{id}"), "trainer-123");
    }

    #[test]
    fn generated_ids_are_unique() {
        let id1 = PokemonId::generate();
        let id2 = PokemonId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn box_id_equality() {
        let id1 = BoxId::new("box-1");
        let id2 = BoxId::new("box-1");
        let id3 = BoxId::new("box-2");
        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn trade_id_from_string() {
        let id: TradeId = "trade-1".into();
        assert_eq!(id.as_str(), "trade-1");

        let id: TradeId = String::from("trade-2").into();
        assert_eq!(id.as_str(), "trade-2");
    }

    #[test]
    fn serde_is_transparent() {
        let id = PokemonId::new("pkm-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"pkm-1\"");

        let parsed: PokemonId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn hash_works_for_collections() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(PokemonId::new("pkm-1"));
        set.insert(PokemonId::new("pkm-2"));
        set.insert(PokemonId::new("pkm-1")); // duplicate

        assert_eq!(set.len(), 2);
    }
}
