//! Recommendation - the scored outcome of one match.

use serde::{Deserialize, Serialize};

use crate::domain::ahp::{Judgement, RankedAlternative, ScoringOutcome};
use crate::domain::foundation::{AlternativeId, MatchId, Timestamp};

/// Ranked alternatives for a match, best first.
///
/// Replaced wholesale every time the recommendation is recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub match_id: MatchId,
    pub rankings: Vec<RankedAlternative>,
    pub judgements: Vec<Judgement>,
    pub computed_at: Timestamp,
}

impl Recommendation {
    /// Wraps a scoring outcome computed for a match.
    pub fn new(match_id: MatchId, outcome: ScoringOutcome) -> Self {
        Self {
            match_id,
            rankings: outcome.rankings,
            judgements: outcome.judgements,
            computed_at: Timestamp::now(),
        }
    }

    /// Returns the recommended alternative.
    pub fn best(&self) -> Option<AlternativeId> {
        self.rankings.first().map(|r| r.alternative_id)
    }

    /// Returns the rank of an alternative, if it was scored.
    pub fn rank_of(&self, alternative: &AlternativeId) -> Option<usize> {
        self.rankings
            .iter()
            .find(|r| &r.alternative_id == alternative)
            .map(|r| r.rank)
    }
}
