//! Persistence adapters.

pub mod identity;
pub mod inventory_store;
pub mod trade_repository;

pub use identity::InMemoryIdentityDirectory;
pub use inventory_store::{BoxDeletionPolicy, InMemoryInventoryStore};
pub use trade_repository::InMemoryTradeRepository;
