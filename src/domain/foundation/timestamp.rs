//! Timestamp value object for computation results.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_now_is_monotonic() {
        let first = Timestamp::now();
        let second = Timestamp::now();
        assert!(second >= first);
    }

    #[test]
    fn timestamp_displays_as_rfc3339() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00.250Z\"").unwrap();
        assert_eq!(ts.to_string(), "2024-01-15T10:30:00Z");
    }

    #[test]
    fn timestamp_round_trips_through_json() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15"));
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);
    }
}
