//! Review lifecycle states.
//!
//! A request with no review row is implicitly pending. Once a reviewer
//! claims it, a review row exists in `Progress`; completing it moves the
//! row to `Completed`. There are no other transitions: no rejection, no
//! reassignment, no cancellation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle state of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    /// No review row exists yet for the request.
    Pending,
    /// A reviewer has claimed the request and is working on it.
    Progress,
    /// The review is finished; `end_date` and the result link are set.
    Completed,
}

impl ReviewState {
    /// The string stored in the `review_state` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewState::Pending => "pending",
            ReviewState::Progress => "progress",
            ReviewState::Completed => "completed",
        }
    }

    /// Parse a stored state string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(ReviewState::Pending),
            "progress" => Ok(ReviewState::Progress),
            "completed" => Ok(ReviewState::Completed),
            other => Err(CoreError::Internal(format!(
                "Unknown review state '{other}'"
            ))),
        }
    }

    /// Whether `next` is a legal transition from `self`.
    ///
    /// The lifecycle only moves forward: pending -> progress -> completed.
    pub fn can_transition_to(self, next: ReviewState) -> bool {
        matches!(
            (self, next),
            (ReviewState::Pending, ReviewState::Progress)
                | (ReviewState::Progress, ReviewState::Completed)
        )
    }
}

impl std::fmt::Display for ReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for state in [
            ReviewState::Pending,
            ReviewState::Progress,
            ReviewState::Completed,
        ] {
            assert_eq!(ReviewState::parse(state.as_str()).unwrap(), state);
        }
    }

    #[test]
    fn test_parse_unknown_state_fails() {
        assert!(ReviewState::parse("cancelled").is_err());
        assert!(ReviewState::parse("").is_err());
    }

    #[test]
    fn test_only_forward_transitions_are_legal() {
        assert!(ReviewState::Pending.can_transition_to(ReviewState::Progress));
        assert!(ReviewState::Progress.can_transition_to(ReviewState::Completed));

        assert!(!ReviewState::Pending.can_transition_to(ReviewState::Completed));
        assert!(!ReviewState::Progress.can_transition_to(ReviewState::Pending));
        assert!(!ReviewState::Completed.can_transition_to(ReviewState::Progress));
        assert!(!ReviewState::Completed.can_transition_to(ReviewState::Pending));
    }
}
