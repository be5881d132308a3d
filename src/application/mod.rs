//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

mod advisor;
pub mod evaluation_request;
pub mod handlers;
mod match_locks;

pub use advisor::{Advisor, AdvisorOutcome};
pub use evaluation_request::{AlternativeSheet, EvaluationRequest, RequestError};
pub use handlers::{
    GetRecommendationHandler, GetRecommendationQuery,
    SubmitAlternativesCommand, SubmitAlternativesHandler, SubmitAlternativesResult,
    SubmitPreferencesCommand, SubmitPreferencesHandler, SubmitPreferencesResult,
};
pub use match_locks::{MatchGuard, MatchLocks};
