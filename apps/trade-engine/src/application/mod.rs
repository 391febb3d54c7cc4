//! Application layer - use cases, ports, and DTOs.

pub mod dto;
pub mod ports;
pub mod use_cases;
