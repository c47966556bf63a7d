// Service configuration read from the environment.
//
// Keys
// - SCHEDULE_INTERVAL_MINUTES: bucket length, default 45.
// - SCHEDULE_SHIFT_START, SCHEDULE_SHIFT_END: "HH:MM", default 07:00 and 20:00.
// - SCHEDULE_DAYS: number of days from Monday, 1 to 6, default 6.
// - SCHEDULE_CONFLICT_POLICY: "inform" or "block", default inform.
// - SCHEDULE_ACTIVE_NOW_SECS: refresh period of the class in progress marker, default 60.
// - BIND_ADDR: listen address, default 0.0.0.0:8080.
//
// Unset keys fall back to their default. Malformed values are an error.

use crate::core::schedule::assignment::DayOfWeek;
use crate::core::schedule::config::{ConflictPolicy, ScheduleConfig, ShiftWindow, ShiftWindowError};
use chrono::NaiveTime;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },

    #[error(transparent)]
    Shift(#[from] ShiftWindowError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub schedule: ScheduleConfig,
    pub bind_addr: SocketAddr,
}

impl ShellConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ScheduleConfig::default();

        let interval_minutes = match lookup("SCHEDULE_INTERVAL_MINUTES") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => return Err(invalid("SCHEDULE_INTERVAL_MINUTES", value)),
            },
            None => defaults.interval_minutes,
        };

        let shift_start = match lookup("SCHEDULE_SHIFT_START") {
            Some(value) => parse_clock("SCHEDULE_SHIFT_START", value)?,
            None => defaults.shift.start_time(),
        };
        let shift_end = match lookup("SCHEDULE_SHIFT_END") {
            Some(value) => parse_clock("SCHEDULE_SHIFT_END", value)?,
            None => defaults.shift.end_time(),
        };
        let shift = ShiftWindow::new(shift_start, shift_end)?;

        let days = match lookup("SCHEDULE_DAYS") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(count) if (1..=DayOfWeek::ALL.len()).contains(&count) => {
                    DayOfWeek::ALL[..count].to_vec()
                }
                _ => return Err(invalid("SCHEDULE_DAYS", value)),
            },
            None => defaults.days,
        };

        let conflict_policy = match lookup("SCHEDULE_CONFLICT_POLICY") {
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "inform" => ConflictPolicy::Inform,
                "block" => ConflictPolicy::Block,
                _ => return Err(invalid("SCHEDULE_CONFLICT_POLICY", value)),
            },
            None => defaults.conflict_policy,
        };

        let active_now_period = match lookup("SCHEDULE_ACTIVE_NOW_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(invalid("SCHEDULE_ACTIVE_NOW_SECS", value)),
            },
            None => defaults.active_now_period,
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .trim()
            .parse()
            .map_err(|_| invalid("BIND_ADDR", bind_addr.clone()))?;

        Ok(Self {
            schedule: ScheduleConfig {
                interval_minutes,
                shift,
                days,
                conflict_policy,
                active_now_period,
            },
            bind_addr,
        })
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { key, value }
}

fn parse_clock(key: &'static str, value: String) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| invalid(key, value))
}
