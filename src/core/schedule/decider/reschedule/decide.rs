// Pure decision function for moving an existing class.
//
// Responsibilities
// - Apply the requested day and time range over the current assignment.
// - Recompute conflicts against the related classes, excluding the assignment itself.
// - Apply the same interval and policy rules as creation.

use crate::core::schedule::assignment::Assignment;
use crate::core::schedule::config::ConflictPolicy;
use crate::core::schedule::conflicts::detect_conflicts;
use crate::core::schedule::decider::decision::{DecideError, Decision};
use crate::core::schedule::decider::reschedule::command::RescheduleAssignment;

pub fn decide_reschedule(
    current: &Assignment,
    existing: &[Assignment],
    command: RescheduleAssignment,
    policy: ConflictPolicy,
) -> Decision {
    let mut moved = current.clone();
    moved.day_of_week = command.day_of_week.unwrap_or(current.day_of_week);
    moved.start_time = command.start_time.unwrap_or(current.start_time);
    moved.end_time = command.end_time.unwrap_or(current.end_time);
    if moved.end_time <= moved.start_time {
        return Decision::Rejected {
            reason: DecideError::InvalidInterval,
        };
    }

    let others: Vec<Assignment> = existing
        .iter()
        .filter(|other| other.id != current.id)
        .cloned()
        .collect();
    let conflicts = detect_conflicts(&moved, &others);
    if policy == ConflictPolicy::Block && !conflicts.is_empty() {
        return Decision::Rejected {
            reason: DecideError::Conflicting(conflicts),
        };
    }
    moved.conflicts = conflicts;
    Decision::Accepted { assignment: moved }
}
