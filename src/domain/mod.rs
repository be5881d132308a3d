//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `hierarchy` - Goal → main → sub criteria tree
//! - `ahp` - Pure AHP services (matrices, weights, consistency, scoring)
//! - `recommendation` - Scored outcome of a match

pub mod ahp;
pub mod foundation;
pub mod hierarchy;
pub mod recommendation;
