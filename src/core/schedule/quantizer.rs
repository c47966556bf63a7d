use crate::core::schedule::assignment::minutes_since_midnight;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_INTERVAL_MINUTES: u32 = 45;

/// A fixed-length time slice keyed as `hours * 100 + minutes` (7:30 is 730).
///
/// Minutes always stay in `0..60`, so ordering the key is chronological ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeBucket(u16);

impl TimeBucket {
    pub fn from_minutes(minutes: u32) -> Self {
        Self(((minutes / 60) * 100 + minutes % 60) as u16)
    }

    pub fn key(&self) -> u16 {
        self.0
    }

    pub fn minutes(&self) -> u32 {
        u32::from(self.0 / 100) * 60 + u32::from(self.0 % 100)
    }

    pub fn label(&self) -> String {
        format!("{:02}:{:02}", self.0 / 100, self.0 % 100)
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Split `start..end` into `ceil((end - start) / interval)` buckets beginning at `start`.
///
/// Degenerate or inverted ranges and a zero interval yield no buckets.
pub fn quantize(start: NaiveTime, end: NaiveTime, interval_minutes: u32) -> Vec<TimeBucket> {
    quantize_minutes(
        minutes_since_midnight(start),
        minutes_since_midnight(end),
        interval_minutes,
    )
}

pub fn quantize_minutes(start: u32, end: u32, interval_minutes: u32) -> Vec<TimeBucket> {
    if interval_minutes == 0 || end <= start {
        return Vec::new();
    }
    let block_count = (end - start).div_ceil(interval_minutes);
    (0..block_count)
        .map(|block| TimeBucket::from_minutes(start + block * interval_minutes))
        .collect()
}

/// Round `minutes` down onto the grid that starts at `origin`. Values before the origin are returned unchanged.
pub fn snap_to_grid(minutes: u32, origin: u32, interval_minutes: u32) -> u32 {
    if interval_minutes == 0 || minutes < origin {
        return minutes;
    }
    origin + ((minutes - origin) / interval_minutes) * interval_minutes
}
