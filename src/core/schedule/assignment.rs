// A single scheduled class occurrence and the conflicts derived for it.
//
// Notes
// - Times are wall-clock time-of-day. Only hour and minute take part in scheduling.
// - `conflicts` is derived state. It is rebuilt on every evaluation and never persisted.

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type AssignmentId = String;

/// Days of the academic week. Declaration order is chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 6] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }

    /// Sunday has no academic counterpart.
    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(DayOfWeek::Monday),
            Weekday::Tue => Some(DayOfWeek::Tuesday),
            Weekday::Wed => Some(DayOfWeek::Wednesday),
            Weekday::Thu => Some(DayOfWeek::Thursday),
            Weekday::Fri => Some(DayOfWeek::Friday),
            Weekday::Sat => Some(DayOfWeek::Saturday),
            Weekday::Sun => None,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Option<AssignmentId>,
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
    #[serde(default)]
    pub conflicts: Vec<ConflictRecord>,
}

impl Assignment {
    pub fn start_minutes(&self) -> u32 {
        minutes_since_midnight(self.start_time)
    }

    pub fn end_minutes(&self) -> u32 {
        minutes_since_midnight(self.end_time)
    }

    /// Same day and half-open time ranges intersect.
    pub fn overlaps(&self, other: &Assignment) -> bool {
        self.day_of_week == other.day_of_week
            && self.start_minutes() < other.end_minutes()
            && other.start_minutes() < self.end_minutes()
    }

    pub fn is_active_at(&self, day: DayOfWeek, time: NaiveTime) -> bool {
        let minute = minutes_since_midnight(time);
        self.day_of_week == day && self.start_minutes() <= minute && minute < self.end_minutes()
    }

    pub fn time_range_label(&self) -> String {
        format!(
            "{} - {}",
            format_clock(self.start_time),
            format_clock(self.end_time)
        )
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn snapshot(&self) -> AssignmentSnapshot {
        AssignmentSnapshot {
            id: self.id.clone(),
            course_name: self.course_name.clone(),
            professor_name: self.professor_name.clone(),
            room_code: self.room_code.clone(),
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    ProfessorConflict,
    RoomConflict,
    SectionConflict,
    Other,
}

/// Read-only copy of the other side of a conflict, enough to display it without a second fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSnapshot {
    pub id: Option<AssignmentId>,
    pub course_name: String,
    pub professor_name: String,
    pub room_code: String,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub kind: ConflictKind,
    pub resource_description: String,
    pub message: String,
    pub conflicting_assignment: AssignmentSnapshot,
}
