//! Evaluation request - one match's hierarchy, rankings and scores in a file.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::ahp::{AlternativeScores, PreferenceSet};
use crate::domain::foundation::{AlternativeId, CriterionId, DomainError, ErrorCode, MatchId};
use crate::domain::hierarchy::{CriteriaHierarchy, Criterion};

/// Errors that can occur while reading a request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read request from stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML request: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported request format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

/// Scores of one alternative against sub-criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeSheet {
    pub alternative_id: AlternativeId,
    #[serde(default)]
    pub name: String,
    pub scores: BTreeMap<CriterionId, f64>,
}

/// Everything needed to produce one recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Generated when absent.
    #[serde(default)]
    pub match_id: Option<MatchId>,
    pub criteria: Vec<Criterion>,
    pub preferences: PreferenceSet,
    pub alternatives: Vec<AlternativeSheet>,
}

impl EvaluationRequest {
    /// Parses a JSON request.
    pub fn from_json_str(json: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a YAML request.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RequestError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads a JSON request from a reader, typically stdin.
    pub fn from_json_reader(mut reader: impl Read) -> Result<Self, RequestError> {
        let mut buffer = String::new();
        reader
            .read_to_string(&mut buffer)
            .map_err(RequestError::Stdin)?;
        Self::from_json_str(&buffer)
    }

    /// Loads a request file, choosing the format by extension.
    pub fn load_from_path(path: &Path) -> Result<Self, RequestError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let parse: fn(&str) -> Result<Self, RequestError> = match extension.as_str() {
            "json" => Self::from_json_str,
            "yaml" | "yml" => Self::from_yaml_str,
            _ => return Err(RequestError::UnsupportedFormat(path.display().to_string())),
        };

        let content = std::fs::read_to_string(path).map_err(|source| RequestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&content)
    }

    /// Returns the match id, generating one if the request has none.
    pub fn match_id(&self) -> MatchId {
        self.match_id.unwrap_or_default()
    }

    /// Builds and validates the criteria hierarchy.
    pub fn hierarchy(&self) -> Result<CriteriaHierarchy, DomainError> {
        Ok(CriteriaHierarchy::new(self.criteria.clone())?)
    }

    /// Collects the alternative sheets into one score table.
    pub fn score_sheet(&self) -> Result<AlternativeScores, DomainError> {
        let mut seen = HashSet::with_capacity(self.alternatives.len());
        let mut scores = AlternativeScores::empty();

        for sheet in &self.alternatives {
            if !seen.insert(sheet.alternative_id) {
                return Err(DomainError::new(
                    ErrorCode::InvalidInput,
                    format!("Alternative {} is listed more than once", sheet.alternative_id),
                )
                .with_detail("alternative_id", sheet.alternative_id.to_string()));
            }
            for (criterion, score) in &sheet.scores {
                scores.insert(sheet.alternative_id, *criterion, *score);
            }
        }
        Ok(scores)
    }
}
