//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory match storage

pub mod memory;

pub use memory::InMemoryMatchStore;
