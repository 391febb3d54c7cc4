//! Domain layer - core business logic with no external dependencies.

pub mod inventory;
pub mod shared;
pub mod trading;
