//! Criterion - a node of the goal → main → sub criteria tree.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::CriterionId;

/// Position of a criterion within the three-level hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionLevel {
    Goal,
    Main,
    Sub,
}

impl CriterionLevel {
    /// Maps a distance from the goal to a level.
    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            0 => Some(CriterionLevel::Goal),
            1 => Some(CriterionLevel::Main),
            2 => Some(CriterionLevel::Sub),
            _ => None,
        }
    }

    /// Returns the distance from the goal.
    pub fn depth(&self) -> usize {
        match self {
            CriterionLevel::Goal => 0,
            CriterionLevel::Main => 1,
            CriterionLevel::Sub => 2,
        }
    }
}

impl fmt::Display for CriterionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CriterionLevel::Goal => "goal",
            CriterionLevel::Main => "main",
            CriterionLevel::Sub => "sub",
        };
        write!(f, "{}", s)
    }
}

/// A criterion record as supplied by the caller.
///
/// The level is not stored; it is derived from the parent chain when the
/// criterion is placed into a [`CriteriaHierarchy`](super::CriteriaHierarchy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    /// Short reference code, e.g. `PA` or `PA-HC`.
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent: Option<CriterionId>,
}

impl Criterion {
    /// Creates a root criterion (the goal) from its record id.
    pub fn new(id: i64, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CriterionId::new(id),
            code: code.into(),
            name: name.into(),
            parent: None,
        }
    }

    /// Sets the parent criterion.
    pub fn with_parent(mut self, parent: i64) -> Self {
        self.parent = Some(CriterionId::new(parent));
        self
    }

    /// Returns true if this criterion has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
