// Resource conflict detection.
//
// Two classes conflict when they fall on the same day, their time ranges overlap and they
// share a section, a room or a professor. One record is produced per clashing pair. When
// several resources are shared, the most specific one labels the record:
// Section > Room > Professor.
//
// Empty resource identifiers mean "not assigned yet" and never count as shared.

use crate::core::schedule::assignment::{Assignment, ConflictKind, ConflictRecord};

pub fn detect_conflicts(candidate: &Assignment, existing: &[Assignment]) -> Vec<ConflictRecord> {
    existing
        .iter()
        .filter(|other| !is_same_assignment(candidate, other))
        .filter_map(|other| conflict_between(candidate, other))
        .collect()
}

/// Recompute the conflict list of every assignment against all the others.
///
/// Self-exclusion is positional, so unsaved assignments without an id are handled too.
pub fn annotate_conflicts(assignments: Vec<Assignment>) -> Vec<Assignment> {
    let snapshot = assignments.clone();
    assignments
        .into_iter()
        .enumerate()
        .map(|(index, mut assignment)| {
            let conflicts = snapshot
                .iter()
                .enumerate()
                .filter(|(other_index, other)| {
                    *other_index != index && !is_same_assignment(&assignment, other)
                })
                .filter_map(|(_, other)| conflict_between(&assignment, other))
                .collect();
            assignment.conflicts = conflicts;
            assignment
        })
        .collect()
}

pub fn conflict_between(candidate: &Assignment, other: &Assignment) -> Option<ConflictRecord> {
    if !candidate.overlaps(other) {
        return None;
    }
    let kind = shared_resource(candidate, other)?;
    let (resource_description, message) = match kind {
        ConflictKind::SectionConflict => (
            candidate.section_id.clone(),
            format!(
                "Section {} already has {} on {} {}",
                candidate.section_id,
                other.course_name,
                other.day_of_week,
                other.time_range_label()
            ),
        ),
        ConflictKind::RoomConflict => (
            candidate.room_code.clone(),
            format!(
                "Room {} is already booked for {} on {} {}",
                candidate.room_code,
                other.course_name,
                other.day_of_week,
                other.time_range_label()
            ),
        ),
        ConflictKind::ProfessorConflict | ConflictKind::Other => (
            candidate.professor_name.clone(),
            format!(
                "{} is already teaching {} on {} {}",
                candidate.professor_name,
                other.course_name,
                other.day_of_week,
                other.time_range_label()
            ),
        ),
    };
    Some(ConflictRecord {
        kind,
        resource_description,
        message,
        conflicting_assignment: other.snapshot(),
    })
}

fn shared_resource(a: &Assignment, b: &Assignment) -> Option<ConflictKind> {
    if shares(&a.section_id, &b.section_id) {
        Some(ConflictKind::SectionConflict)
    } else if shares(&a.room_id, &b.room_id) {
        Some(ConflictKind::RoomConflict)
    } else if shares(&a.professor_id, &b.professor_id) {
        Some(ConflictKind::ProfessorConflict)
    } else {
        None
    }
}

fn shares(a: &str, b: &str) -> bool {
    !a.is_empty() && a == b
}

fn is_same_assignment(a: &Assignment, b: &Assignment) -> bool {
    matches!((&a.id, &b.id), (Some(a), Some(b)) if a == b)
}
