//! Results of review mutations that can be silently refused.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether a mutation changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Why a mutation was refused without changing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Comment text was empty after trimming.
    BlankComment,
    /// The review is finalized; the checklist is read-only.
    ReviewComplete,
    /// Finalize requires every item to be checked.
    NotAllChecked,
    /// Finalize on a review that is already complete.
    AlreadyComplete,
    /// Cancel on a review that was never finalized.
    NotComplete,
    /// Export requires a finalized review.
    NotExportReady,
    /// An export for this project has not finished yet.
    ExportInFlight,
    /// The key does not submit drafts.
    KeyNotHandled,
}

/// Key signal delivered by the draft editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum KeySignal {
    Enter,
    Other,
}

/// Response to a key press in the draft editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DraftKeyResponse {
    pub outcome: Outcome,
    /// The surface must skip its default handling (newline insertion).
    pub suppress_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_with_reason() {
        let json = serde_json::to_value(Outcome::Ignored(IgnoreReason::NotAllChecked)).unwrap();
        assert_eq!(json["outcome"], "ignored");
        assert_eq!(json["reason"], "not_all_checked");

        let json = serde_json::to_value(Outcome::Applied).unwrap();
        assert_eq!(json["outcome"], "applied");
    }

    #[test]
    fn is_applied_only_for_applied() {
        assert!(Outcome::Applied.is_applied());
        assert!(!Outcome::Ignored(IgnoreReason::BlankComment).is_applied());
    }
}
