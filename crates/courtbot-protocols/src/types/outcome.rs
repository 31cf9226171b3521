//! Slot candidates and booking outcomes.

use serde::{Deserialize, Serialize};

use super::TimeOfDay;

/// A cell of the booking grid under consideration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCandidate {
    pub time: TimeOfDay,
    pub court_label: String,
    /// Whether the court rule rejected this cell.
    pub is_excluded: bool,
}

/// Classification of a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    LoginFailed,
    PastDate,
    SkippedDate,
    NavigationStuck,
    NoSlotAvailable,
    UnknownOpponent,
    CommitFailed,
    /// The page driver itself failed outside the commit step.
    DriverFailure,
}

impl FailureKind {
    /// An expected outcome under demand rather than a fault.
    pub fn is_clean(&self) -> bool {
        matches!(self, FailureKind::NoSlotAvailable)
    }
}

/// Result of one booking attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingOutcome {
    pub succeeded: bool,
    pub chosen_slot: Option<SlotCandidate>,
    pub failure_reason: Option<FailureKind>,
    /// Human-readable detail for logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BookingOutcome {
    pub fn success(slot: SlotCandidate) -> Self {
        Self {
            succeeded: true,
            chosen_slot: Some(slot),
            failure_reason: None,
            message: None,
        }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            chosen_slot: None,
            failure_reason: Some(kind),
            message: Some(message.into()),
        }
    }
}
