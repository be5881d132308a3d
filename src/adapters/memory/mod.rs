//! In-memory adapters.

mod match_store;

pub use match_store::InMemoryMatchStore;
