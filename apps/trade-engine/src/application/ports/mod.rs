//! Application ports - trait boundaries to infrastructure collaborators.

pub mod destination;
pub mod identity;
pub mod inventory;

pub use destination::{DestinationError, DestinationPolicy, OldestBoxPolicy};
pub use identity::{IdentityDirectory, IdentityError, Trainer, TrainerFilter};
pub use inventory::{
    InventoryStore, InventoryTransfer, PlannedTransfer, PokemonFilter, SwapError, SwapPlan,
};
