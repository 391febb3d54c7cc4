// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Trade Engine - Rust Core Library
//!
//! Trade negotiation and inventory consistency engine for the PokeBox
//! collection service.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic
//!   - `inventory`: boxes and creatures; the single-owner invariant
//!   - `trading`: the trade aggregate and its lifecycle state machine
//!   - `shared`: identifiers, timestamps, pagination
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: interfaces for collaborators (`InventoryStore`,
//!     `InventoryTransfer`, `IdentityDirectory`, `DestinationPolicy`)
//!   - `use_cases`: box/creature management, trade proposal, the trade
//!     executor, searches
//!   - `dto`: wire-shaped data transfer objects
//!
//! - **Infrastructure**: Adapters
//!   - `persistence`: in-memory inventory store, trade ledger, identity
//!     directory
//!   - `http`: REST API controllers
//!
//! # Ownership model
//!
//! A creature's owner is always derived from the box holding it; no
//! record ever stores the owner directly. The only way ownership
//! changes trainer is the trade executor's atomic swap, reached through
//! the privileged `InventoryTransfer` port that the HTTP surface never
//! touches.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// Domain re-exports
pub use domain::inventory::{
    aggregate::{CreatePokemonCommand, Pokemon, PokemonBox, PokemonPatch},
    errors::InventoryError,
    value_objects::{Gender, Level, OwnedPokemon},
};
pub use domain::shared::{BoxId, Page, PokemonId, Timestamp, TradeId, TrainerId};
pub use domain::trading::{
    ProposeTradeCommand, Trade, TradeDecision, TradeError, TradeFailureReason, TradeRepository,
    TradeResolution, TradeStatus,
};

// Application re-exports
pub use application::ports::{
    DestinationPolicy, IdentityDirectory, InventoryStore, InventoryTransfer, OldestBoxPolicy,
    PokemonFilter, Trainer, TrainerFilter,
};
pub use application::use_cases::{
    ManageBoxesUseCase, ManagePokemonsUseCase, ProposeTradeUseCase, RespondTradeUseCase,
    SearchUseCase, TradeLocks, TradeQueriesUseCase,
};

// Infrastructure re-exports
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::{
    BoxDeletionPolicy, InMemoryIdentityDirectory, InMemoryInventoryStore, InMemoryTradeRepository,
};
