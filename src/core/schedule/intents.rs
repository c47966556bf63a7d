use crate::core::schedule::assignment::{Assignment, AssignmentSnapshot};

/// Notifications requested by accepted writes.
/// The outbound notification dispatch translates these into outbox rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleIntent {
    NotifyAssignmentCreated {
        assignment: Assignment,
    },
    NotifyAssignmentRescheduled {
        previous: AssignmentSnapshot,
        assignment: Assignment,
    },
    NotifyAssignmentDeleted {
        assignment: AssignmentSnapshot,
    },
}
