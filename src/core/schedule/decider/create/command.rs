// Command data type for scheduling a new class.
//
// Purpose
// - Express the intent to place a course on a day and time range with a professor, a room
//   and a section.
// - Stay independent of the transport layer.

use crate::core::schedule::assignment::{Assignment, DayOfWeek};
use chrono::NaiveTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAssignment {
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub professor_id: String,
    pub professor_name: String,
    pub room_id: String,
    pub room_code: String,
    pub section_id: String,
    pub course_id: String,
    pub course_name: String,
}

impl CreateAssignment {
    /// Unsaved assignment: no id until persistence assigns one.
    pub fn into_assignment(self) -> Assignment {
        Assignment {
            id: None,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            professor_id: self.professor_id,
            professor_name: self.professor_name,
            room_id: self.room_id,
            room_code: self.room_code,
            section_id: self.section_id,
            course_id: self.course_id,
            course_name: self.course_name,
            conflicts: Vec::new(),
        }
    }
}

impl From<Assignment> for CreateAssignment {
    fn from(assignment: Assignment) -> Self {
        Self {
            day_of_week: assignment.day_of_week,
            start_time: assignment.start_time,
            end_time: assignment.end_time,
            professor_id: assignment.professor_id,
            professor_name: assignment.professor_name,
            room_id: assignment.room_id,
            room_code: assignment.room_code,
            section_id: assignment.section_id,
            course_id: assignment.course_id,
            course_name: assignment.course_name,
        }
    }
}
