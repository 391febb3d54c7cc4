//! Box aggregate root.
//!
//! A box is a named container of creatures with exactly one owning
//! trainer, assigned at creation and never reassigned.

use serde::{Deserialize, Serialize};

use crate::domain::inventory::errors::InventoryError;
use crate::domain::shared::{BoxId, Timestamp, TrainerId};

/// A named container of creatures owned by exactly one trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonBox {
    id: BoxId,
    owner_id: TrainerId,
    name: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl PokemonBox {
    /// Create a new box for a trainer.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty after trimming.
    pub fn new(owner_id: TrainerId, name: &str) -> Result<Self, InventoryError> {
        let name = validate_name(name)?;
        let now = Timestamp::now();
        Ok(Self {
            id: BoxId::generate(),
            owner_id,
            name,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get the box ID.
    #[must_use]
    pub const fn id(&self) -> &BoxId {
        &self.id
    }

    /// Get the owning trainer. Never changes after creation.
    #[must_use]
    pub const fn owner_id(&self) -> &TrainerId {
        &self.owner_id
    }

    /// Get the box name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Check whether a trainer owns this box.
    #[must_use]
    pub fn is_owned_by(&self, trainer_id: &TrainerId) -> bool {
        &self.owner_id == trainer_id
    }

    /// Rename the box.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the new name is empty after trimming.
    pub fn rename(&mut self, new_name: &str) -> Result<(), InventoryError> {
        self.name = validate_name(new_name)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, InventoryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::validation(
            "name",
            "must not be empty after trimming",
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_box_trims_name() {
        let pokebox = PokemonBox::new(TrainerId::new("t-1"), "  Field Team  ").unwrap();
        assert_eq!(pokebox.name(), "Field Team");
        assert!(pokebox.is_owned_by(&TrainerId::new("t-1")));
    }

    #[test]
    fn create_box_rejects_blank_name() {
        let err = PokemonBox::new(TrainerId::new("t-1"), "   ").unwrap_err();
        assert!(matches!(err, InventoryError::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn rename_box() {
        let mut pokebox = PokemonBox::new(TrainerId::new("t-1"), "Old").unwrap();
        pokebox.rename(" New ").unwrap();
        assert_eq!(pokebox.name(), "New");
    }

    #[test]
    fn rename_rejects_blank_name() {
        let mut pokebox = PokemonBox::new(TrainerId::new("t-1"), "Old").unwrap();
        assert!(pokebox.rename("").is_err());
        assert_eq!(pokebox.name(), "Old");
    }

    #[test]
    fn generated_ids_differ() {
        let a = PokemonBox::new(TrainerId::new("t-1"), "A").unwrap();
        let b = PokemonBox::new(TrainerId::new("t-1"), "B").unwrap();
        assert_ne!(a.id(), b.id());
    }
}
