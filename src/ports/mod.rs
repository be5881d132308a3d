//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `MatchStore` - Latest weights, scores and recommendation per match

mod match_store;

pub use match_store::MatchStore;
