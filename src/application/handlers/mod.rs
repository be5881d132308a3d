//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod recommendation;

pub use recommendation::{
    // Commands and results
    SubmitAlternativesCommand, SubmitAlternativesResult,
    SubmitPreferencesCommand, SubmitPreferencesResult,
    // Queries
    GetRecommendationQuery,
    // Handlers
    GetRecommendationHandler, SubmitAlternativesHandler, SubmitPreferencesHandler,
};
