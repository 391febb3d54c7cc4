//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - **Driven Adapters (Outbound)**
//!   - `persistence/`: inventory store, trade ledger, identity directory
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: REST API controllers

pub mod http;
pub mod persistence;
