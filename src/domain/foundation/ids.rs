//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a match a recommendation is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Creates a new random MatchId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a MatchId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of a criterion record (goal, main criterion or sub-criterion).
///
/// Criteria are reference data owned by the caller, so the identifier wraps
/// the caller's record id rather than generating one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionId(i64);

impl CriterionId {
    /// Creates a CriterionId from a record id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw record id.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CriterionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CriterionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| ValidationError::invalid_format("criterion_id", e.to_string()))
    }
}

/// Identifier of an alternative being scored, such as a hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlternativeId(i64);

impl AlternativeId {
    /// Creates an AlternativeId from a record id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw record id.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AlternativeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for AlternativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
