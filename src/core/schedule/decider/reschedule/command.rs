use crate::core::schedule::assignment::{AssignmentId, DayOfWeek};
use chrono::NaiveTime;

/// Move an existing class to another day and/or time range. Unset fields keep their value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleAssignment {
    pub assignment_id: AssignmentId,
    pub day_of_week: Option<DayOfWeek>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}
