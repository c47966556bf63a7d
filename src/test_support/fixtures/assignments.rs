// Shared test fixtures for assignments.

use crate::core::schedule::assignment::{Assignment, DayOfWeek};
use chrono::NaiveTime;

pub fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub struct AssignmentBuilder {
    inner: Assignment,
}

impl Default for AssignmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl AssignmentBuilder {
    /// Monday 07:00-08:30, Calculus I with Prof. Pérez in A-101 for section S-1.
    pub fn new() -> Self {
        Self {
            inner: Assignment {
                id: None,
                day_of_week: DayOfWeek::Monday,
                start_time: clock(7, 0),
                end_time: clock(8, 30),
                professor_id: "P-1".to_string(),
                professor_name: "Prof. Pérez".to_string(),
                room_id: "R-1".to_string(),
                room_code: "A-101".to_string(),
                section_id: "S-1".to_string(),
                course_id: "C-1".to_string(),
                course_name: "Calculus I".to_string(),
                conflicts: Vec::new(),
            },
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = Some(v.into());
        self
    }

    pub fn day(mut self, v: DayOfWeek) -> Self {
        self.inner.day_of_week = v;
        self
    }

    pub fn start_time(mut self, v: NaiveTime) -> Self {
        self.inner.start_time = v;
        self
    }

    pub fn end_time(mut self, v: NaiveTime) -> Self {
        self.inner.end_time = v;
        self
    }

    pub fn professor(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.inner.professor_id = id.into();
        self.inner.professor_name = name.into();
        self
    }

    pub fn room(mut self, id: impl Into<String>, code: impl Into<String>) -> Self {
        self.inner.room_id = id.into();
        self.inner.room_code = code.into();
        self
    }

    pub fn section(mut self, v: impl Into<String>) -> Self {
        self.inner.section_id = v.into();
        self
    }

    pub fn course(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.inner.course_id = id.into();
        self.inner.course_name = name.into();
        self
    }

    pub fn build(self) -> Assignment {
        self.inner
    }
}
