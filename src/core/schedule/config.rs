use crate::core::schedule::assignment::{DayOfWeek, format_clock};
use crate::core::schedule::quantizer::{DEFAULT_INTERVAL_MINUTES, TimeBucket, quantize};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const fn clock(hour: u32, minute: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, minute, 0) {
        Some(time) => time,
        None => panic!("invalid clock time"),
    }
}

pub const DEFAULT_SHIFT_START: NaiveTime = clock(7, 0);
pub const DEFAULT_SHIFT_END: NaiveTime = clock(20, 0);
pub const DEFAULT_ACTIVE_NOW_PERIOD: Duration = Duration::from_secs(60);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShiftWindowError {
    #[error("shift window must end after it starts ({start} >= {end})")]
    Inverted { start: String, end: String },
}

/// Visible time range of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedShiftWindow")]
pub struct ShiftWindow {
    start_time: NaiveTime,
    end_time: NaiveTime,
}

#[derive(Deserialize)]
struct UncheckedShiftWindow {
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl TryFrom<UncheckedShiftWindow> for ShiftWindow {
    type Error = ShiftWindowError;

    fn try_from(raw: UncheckedShiftWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start_time, raw.end_time)
    }
}

impl ShiftWindow {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> Result<Self, ShiftWindowError> {
        if end_time <= start_time {
            return Err(ShiftWindowError::Inverted {
                start: format_clock(start_time),
                end: format_clock(end_time),
            });
        }
        Ok(Self {
            start_time,
            end_time,
        })
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    /// Every row of a grid over this window, occupied or not.
    pub fn buckets(&self, interval_minutes: u32) -> Vec<TimeBucket> {
        quantize(self.start_time, self.end_time, interval_minutes)
    }
}

impl Default for ShiftWindow {
    fn default() -> Self {
        Self {
            start_time: DEFAULT_SHIFT_START,
            end_time: DEFAULT_SHIFT_END,
        }
    }
}

/// What a create or reschedule does when the proposed class collides with existing ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Persist anyway and report the conflicts alongside the stored assignment.
    #[default]
    Inform,
    /// Refuse to persist while any conflict is reported.
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub interval_minutes: u32,
    pub shift: ShiftWindow,
    pub days: Vec<DayOfWeek>,
    pub conflict_policy: ConflictPolicy,
    pub active_now_period: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            shift: ShiftWindow::default(),
            days: DayOfWeek::ALL.to_vec(),
            conflict_policy: ConflictPolicy::default(),
            active_now_period: DEFAULT_ACTIVE_NOW_PERIOD,
        }
    }
}
