// Day x bucket matrix of a week's assignments.
//
// Responsibilities
// - Produce one row per bucket of the shift window and one column per configured day.
// - Merge the buckets of one assignment into a start cell carrying the span, followed by
//   continuation cells that must not be rendered on their own.
//
// Notes
// - The shift window is a viewport: assignments starting outside it are left out.
// - Later assignments overwrite earlier ones on collision: an earlier span starting inside
//   the new one is cleared, an earlier span running into it is cut short. Conflicts are the
//   detector's job.
// - A matrix is never patched. Any change to the assignment list means a full rebuild.

use crate::core::schedule::assignment::{Assignment, DayOfWeek, minutes_since_midnight};
use crate::core::schedule::config::ShiftWindow;
use crate::core::schedule::quantizer::{TimeBucket, quantize_minutes, snap_to_grid};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum GridCell {
    Empty,
    OccupiedStart {
        assignment: Box<Assignment>,
        span_buckets: usize,
    },
    OccupiedContinuation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridMatrix {
    interval_minutes: u32,
    buckets: Vec<TimeBucket>,
    columns: BTreeMap<DayOfWeek, Vec<GridCell>>,
}

impl GridMatrix {
    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    pub fn buckets(&self) -> &[TimeBucket] {
        &self.buckets
    }

    /// Days present in the matrix, in week order.
    pub fn days(&self) -> impl Iterator<Item = DayOfWeek> + '_ {
        self.columns.keys().copied()
    }

    pub fn column(&self, day: DayOfWeek) -> Option<&[GridCell]> {
        self.columns.get(&day).map(Vec::as_slice)
    }

    pub fn cell_at(&self, day: DayOfWeek, row: usize) -> Option<&GridCell> {
        self.columns.get(&day).and_then(|column| column.get(row))
    }

    pub fn cell(&self, day: DayOfWeek, bucket: TimeBucket) -> Option<&GridCell> {
        let row = self.buckets.binary_search(&bucket).ok()?;
        self.cell_at(day, row)
    }

    /// Assignments placed in the matrix, one per start cell.
    pub fn placed(&self) -> impl Iterator<Item = (DayOfWeek, TimeBucket, &Assignment)> + '_ {
        self.columns.iter().flat_map(move |(day, column)| {
            column
                .iter()
                .zip(self.buckets.iter())
                .filter_map(move |(cell, bucket)| match cell {
                    GridCell::OccupiedStart { assignment, .. } => {
                        Some((*day, *bucket, assignment.as_ref()))
                    }
                    _ => None,
                })
        })
    }
}

pub fn build_grid(
    assignments: &[Assignment],
    shift: &ShiftWindow,
    interval_minutes: u32,
    days: &[DayOfWeek],
) -> GridMatrix {
    let buckets = shift.buckets(interval_minutes);
    let rows: HashMap<TimeBucket, usize> = buckets
        .iter()
        .enumerate()
        .map(|(row, bucket)| (*bucket, row))
        .collect();
    let mut columns: BTreeMap<DayOfWeek, Vec<GridCell>> = days
        .iter()
        .map(|day| (*day, vec![GridCell::Empty; buckets.len()]))
        .collect();

    let origin = minutes_since_midnight(shift.start_time());
    for assignment in assignments {
        let Some(column) = columns.get_mut(&assignment.day_of_week) else {
            debug!(
                day = %assignment.day_of_week,
                course = %assignment.course_name,
                "assignment day is not part of the grid"
            );
            continue;
        };
        let start = snap_to_grid(assignment.start_minutes(), origin, interval_minutes);
        let spanned = quantize_minutes(start, assignment.end_minutes(), interval_minutes);
        let Some(row) = spanned.first().and_then(|first| rows.get(first)).copied() else {
            debug!(
                day = %assignment.day_of_week,
                range = %assignment.time_range_label(),
                "assignment starts outside the shift window"
            );
            continue;
        };
        let span_buckets = spanned.len().min(buckets.len() - row);
        evict(column, row..row + span_buckets);
        column[row] = GridCell::OccupiedStart {
            assignment: Box::new(assignment.clone()),
            span_buckets,
        };
        for covered in &mut column[row + 1..row + span_buckets] {
            *covered = GridCell::OccupiedContinuation;
        }
    }

    GridMatrix {
        interval_minutes,
        buckets,
        columns,
    }
}

/// Frees `rows` so every continuation left in the column still follows its start.
fn evict(column: &mut [GridCell], rows: Range<usize>) {
    for row in rows.clone() {
        if matches!(column[row], GridCell::Empty) {
            continue;
        }
        let Some(owner) = (0..=row)
            .rev()
            .find(|r| matches!(column[*r], GridCell::OccupiedStart { .. }))
        else {
            column[row] = GridCell::Empty;
            continue;
        };
        let len = column.len();
        let GridCell::OccupiedStart { span_buckets, .. } = &mut column[owner] else {
            continue;
        };
        let end = (owner + *span_buckets).min(len);
        let keep = rows.start.saturating_sub(owner);
        if keep > 0 {
            *span_buckets = keep;
        }
        for cell in &mut column[owner + keep..end] {
            *cell = GridCell::Empty;
        }
    }
}
