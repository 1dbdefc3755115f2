use serde::{Deserialize, Serialize};

/// Outcome of a single guess submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GuessOutcome {
    /// The guess named a not-yet-guessed item; `position` is its 1-based
    /// rank in the list.
    Correct { position: usize },
    /// No exact hit, but one item scored at or above the similarity
    /// threshold. Carries that item's display name.
    CloseMatch { matched_with: String },
    /// Wrong, duplicate, or submitted against an inactive session.
    Miss,
}

impl GuessOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, GuessOutcome::Correct { .. })
    }
}
