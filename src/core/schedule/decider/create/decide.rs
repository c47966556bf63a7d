// Pure decision function for scheduling a new class.
//
// Responsibilities
// - Reject ranges that do not end after they start.
// - Detect conflicts against the classes sharing the section, professor or room.
// - Under the blocking policy, reject when any conflict is found. Otherwise accept and
//   attach the conflicts to the assignment.
// - Never perform input or output.

use crate::core::schedule::assignment::Assignment;
use crate::core::schedule::config::ConflictPolicy;
use crate::core::schedule::conflicts::detect_conflicts;
use crate::core::schedule::decider::create::command::CreateAssignment;
use crate::core::schedule::decider::decision::{DecideError, Decision};

pub fn decide_create(
    existing: &[Assignment],
    command: CreateAssignment,
    policy: ConflictPolicy,
) -> Decision {
    if command.end_time <= command.start_time {
        return Decision::Rejected {
            reason: DecideError::InvalidInterval,
        };
    }
    let mut assignment = command.into_assignment();
    let conflicts = detect_conflicts(&assignment, existing);
    if policy == ConflictPolicy::Block && !conflicts.is_empty() {
        return Decision::Rejected {
            reason: DecideError::Conflicting(conflicts),
        };
    }
    assignment.conflicts = conflicts;
    Decision::Accepted { assignment }
}
