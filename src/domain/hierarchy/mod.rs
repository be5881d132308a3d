//! Hierarchy Module - The fixed three-level criteria tree.
//!
//! Criteria are reference data supplied by the caller. This module only
//! validates their shape (goal → main criteria → sub-criteria) and answers
//! structural questions; it holds no weights.

mod criteria_hierarchy;
mod criterion;
mod errors;

pub use criteria_hierarchy::CriteriaHierarchy;
pub use criterion::{Criterion, CriterionLevel};
pub use errors::HierarchyError;
