//! Recommendation handlers - Preferences, alternatives and scoring per match.

mod get_recommendation;
mod submit_alternatives;
mod submit_preferences;

pub use get_recommendation::{GetRecommendationHandler, GetRecommendationQuery};
pub use submit_alternatives::{
    SubmitAlternativesCommand, SubmitAlternativesHandler, SubmitAlternativesResult,
};
pub use submit_preferences::{
    SubmitPreferencesCommand, SubmitPreferencesHandler, SubmitPreferencesResult,
};
