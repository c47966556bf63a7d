// Interactive grid state machine.
//
// Purpose
// - Derive the visual state of every renderable cell from the matrix, the local selection,
//   the hovered cell and the set of classes in progress.
// - Turn pointer events into intents for the orchestrator. The view never persists anything.
//
// Notes
// - Visual state is recomputed on every query. Nothing is cached per cell.
// - Precedence when several states apply: Selected > Conflicted > ActiveNow > Idle.

use crate::core::schedule::assignment::{Assignment, AssignmentId, ConflictRecord, DayOfWeek};
use crate::core::schedule::grid::{GridCell, GridMatrix};
use crate::core::schedule::quantizer::TimeBucket;
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub day: DayOfWeek,
    pub bucket: TimeBucket,
}

impl CellRef {
    pub fn new(day: DayOfWeek, bucket: TimeBucket) -> Self {
        Self { day, bucket }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellState {
    Idle,
    ActiveNow,
    Selected,
    Conflicted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEvent {
    Click(CellRef),
    DoubleClick(CellRef),
    ConflictIndicatorClick(CellRef),
    PointerEnter(CellRef),
    PointerLeave(CellRef),
    DeleteClick(CellRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent")]
pub enum GridIntent {
    MoveRequested {
        assignment_id: Option<AssignmentId>,
        from: CellRef,
    },
    MoveCancelled {
        assignment_id: Option<AssignmentId>,
        from: CellRef,
    },
    MoveToSlot {
        assignment_id: Option<AssignmentId>,
        from: CellRef,
        to: CellRef,
    },
    DeleteRequested {
        assignment_id: Option<AssignmentId>,
        cell: CellRef,
    },
    ShowConflictDetail {
        cell: CellRef,
        conflicts: Vec<ConflictRecord>,
    },
}

/// One independently rendered cell. Continuation cells are folded into their start cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView<'a> {
    pub cell: CellRef,
    pub assignment: Option<&'a Assignment>,
    pub span_buckets: usize,
    pub state: CellState,
    pub delete_visible: bool,
}

pub struct GridView {
    matrix: GridMatrix,
    selected: Option<CellRef>,
    hovered: Option<CellRef>,
    active: BTreeSet<CellRef>,
}

impl GridView {
    pub fn new(matrix: GridMatrix) -> Self {
        Self {
            matrix,
            selected: None,
            hovered: None,
            active: BTreeSet::new(),
        }
    }

    pub fn matrix(&self) -> &GridMatrix {
        &self.matrix
    }

    pub fn selected(&self) -> Option<CellRef> {
        self.selected
    }

    pub fn set_active_cells(&mut self, active: BTreeSet<CellRef>) {
        self.active = active;
    }

    /// `None` for continuation cells and cells outside the matrix.
    pub fn cell_state(&self, cell: CellRef) -> Option<CellState> {
        match self.matrix.cell(cell.day, cell.bucket)? {
            GridCell::Empty => Some(CellState::Idle),
            GridCell::OccupiedStart { assignment, .. } => Some(self.occupied_state(cell, assignment)),
            GridCell::OccupiedContinuation => None,
        }
    }

    pub fn delete_visible(&self, cell: CellRef) -> bool {
        self.hovered == Some(cell) && self.assignment_at(cell).is_some()
    }

    pub fn cells(&self) -> Vec<CellView<'_>> {
        let mut views = Vec::new();
        for day in self.matrix.days() {
            for bucket in self.matrix.buckets() {
                let cell = CellRef::new(day, *bucket);
                match self.matrix.cell(day, *bucket) {
                    Some(GridCell::Empty) => views.push(CellView {
                        cell,
                        assignment: None,
                        span_buckets: 1,
                        state: CellState::Idle,
                        delete_visible: false,
                    }),
                    Some(GridCell::OccupiedStart {
                        assignment,
                        span_buckets,
                    }) => views.push(CellView {
                        cell,
                        assignment: Some(assignment.as_ref()),
                        span_buckets: *span_buckets,
                        state: self.occupied_state(cell, assignment),
                        delete_visible: self.delete_visible(cell),
                    }),
                    Some(GridCell::OccupiedContinuation) | None => {}
                }
            }
        }
        views
    }

    pub fn handle(&mut self, event: CellEvent) -> Option<GridIntent> {
        match event {
            CellEvent::Click(cell) => self.on_click(cell),
            CellEvent::DoubleClick(cell) => {
                if self.selected != Some(cell) {
                    return None;
                }
                self.selected = None;
                Some(GridIntent::MoveCancelled {
                    assignment_id: self.assignment_id_at(cell),
                    from: cell,
                })
            }
            CellEvent::ConflictIndicatorClick(cell) => {
                let assignment = self.assignment_at(cell)?;
                if !assignment.has_conflicts() {
                    return None;
                }
                Some(GridIntent::ShowConflictDetail {
                    cell,
                    conflicts: assignment.conflicts.clone(),
                })
            }
            CellEvent::PointerEnter(cell) => {
                self.hovered = Some(cell);
                None
            }
            CellEvent::PointerLeave(cell) => {
                if self.hovered == Some(cell) {
                    self.hovered = None;
                }
                None
            }
            CellEvent::DeleteClick(cell) => {
                if !self.delete_visible(cell) {
                    return None;
                }
                Some(GridIntent::DeleteRequested {
                    assignment_id: self.assignment_id_at(cell),
                    cell,
                })
            }
        }
    }

    fn on_click(&mut self, cell: CellRef) -> Option<GridIntent> {
        match (self.matrix.cell(cell.day, cell.bucket)?, self.selected) {
            (GridCell::OccupiedStart { assignment, .. }, None) => {
                self.selected = Some(cell);
                Some(GridIntent::MoveRequested {
                    assignment_id: assignment.id.clone(),
                    from: cell,
                })
            }
            (GridCell::Empty, Some(from)) => {
                self.selected = None;
                Some(GridIntent::MoveToSlot {
                    assignment_id: self.assignment_id_at(from),
                    from,
                    to: cell,
                })
            }
            _ => None,
        }
    }

    fn occupied_state(&self, cell: CellRef, assignment: &Assignment) -> CellState {
        if self.selected == Some(cell) {
            CellState::Selected
        } else if assignment.has_conflicts() {
            CellState::Conflicted
        } else if self.active.contains(&cell) {
            CellState::ActiveNow
        } else {
            CellState::Idle
        }
    }

    fn assignment_at(&self, cell: CellRef) -> Option<&Assignment> {
        match self.matrix.cell(cell.day, cell.bucket)? {
            GridCell::OccupiedStart { assignment, .. } => Some(assignment.as_ref()),
            _ => None,
        }
    }

    fn assignment_id_at(&self, cell: CellRef) -> Option<AssignmentId> {
        self.assignment_at(cell).and_then(|assignment| assignment.id.clone())
    }
}

/// Start cells whose class is in progress at `now`.
pub fn active_cells(matrix: &GridMatrix, now: NaiveDateTime) -> BTreeSet<CellRef> {
    let Some(today) = DayOfWeek::from_weekday(now.weekday()) else {
        return BTreeSet::new();
    };
    matrix
        .placed()
        .filter(|(_, _, assignment)| assignment.is_active_at(today, now.time()))
        .map(|(day, bucket, _)| CellRef::new(day, bucket))
        .collect()
}
