use crate::core::schedule::assignment::{Assignment, ConflictRecord};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("end time must be after start time")]
    InvalidInterval,

    #[error("assignment conflicts with {} existing class(es)", .0.len())]
    Conflicting(Vec<ConflictRecord>),
}

/// Outcome of a create or reschedule decision.
///
/// An accepted assignment carries the conflicts found for it. They are informational
/// unless the policy in force rejected the write.
#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    Accepted { assignment: Assignment },
    Rejected { reason: DecideError },
}
