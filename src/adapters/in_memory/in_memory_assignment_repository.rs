// In memory implementation of the AssignmentRepository and AvailabilitySearch ports.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Store assignments keyed by id, assigning uuid v7 ids on insert.
// - Strip derived conflicts before storing.
// - Answer availability searches with a free-window scan over the configured week.

use crate::core::ports::{
    AssignmentRepository, AvailabilitySearch, ProfessorCandidate, RepositoryError, RoomCandidate,
};
use crate::core::schedule::assignment::{Assignment, minutes_since_midnight};
use crate::core::schedule::config::ScheduleConfig;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryAssignmentRepository {
    assignments: RwLock<BTreeMap<String, Assignment>>,
    professors: Vec<ProfessorCandidate>,
    rooms: Vec<RoomCandidate>,
    config: ScheduleConfig,
    is_offline: bool,
}

impl InMemoryAssignmentRepository {
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_catalog(
        mut self,
        professors: Vec<ProfessorCandidate>,
        rooms: Vec<RoomCandidate>,
    ) -> Self {
        self.professors = professors;
        self.rooms = rooms;
        self
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), RepositoryError> {
        if self.is_offline {
            return Err(RepositoryError::Backend(
                "Assignment repository offline".into(),
            ));
        }
        Ok(())
    }

    async fn list_where(
        &self,
        predicate: impl Fn(&Assignment) -> bool,
    ) -> Result<Vec<Assignment>, RepositoryError> {
        self.ensure_online()?;
        let mut items: Vec<Assignment> = self
            .assignments
            .read()
            .await
            .values()
            .filter(|assignment| predicate(assignment))
            .cloned()
            .collect();
        items.sort_by_key(|assignment| (assignment.day_of_week, assignment.start_time));
        Ok(items)
    }

    /// Some configured day has a gap of `needed_minutes` inside the shift that none of `booked` touches.
    fn has_free_window(&self, booked: &[Assignment], needed_minutes: u32) -> bool {
        let shift_start = minutes_since_midnight(self.config.shift.start_time());
        let shift_end = minutes_since_midnight(self.config.shift.end_time());
        let step = self.config.interval_minutes.max(1);
        self.config.days.iter().any(|day| {
            let busy: Vec<(u32, u32)> = booked
                .iter()
                .filter(|assignment| assignment.day_of_week == *day)
                .map(|assignment| (assignment.start_minutes(), assignment.end_minutes()))
                .collect();
            (shift_start..shift_end)
                .step_by(step as usize)
                .map_while(|start| {
                    start
                        .checked_add(needed_minutes)
                        .filter(|end| *end <= shift_end)
                        .map(|end| (start, end))
                })
                .any(|(start, end)| {
                    busy.iter()
                        .all(|(busy_start, busy_end)| end <= *busy_start || *busy_end <= start)
                })
        })
    }
}

#[async_trait::async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn get(&self, id: &str) -> Result<Assignment, RepositoryError> {
        self.ensure_online()?;
        self.assignments
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn insert(&self, mut assignment: Assignment) -> Result<Assignment, RepositoryError> {
        self.ensure_online()?;
        let id = assignment
            .id
            .clone()
            .unwrap_or_else(|| Uuid::now_v7().to_string());
        assignment.id = Some(id.clone());
        assignment.conflicts.clear();
        self.assignments
            .write()
            .await
            .insert(id, assignment.clone());
        Ok(assignment)
    }

    async fn update(&self, mut assignment: Assignment) -> Result<Assignment, RepositoryError> {
        self.ensure_online()?;
        let id = assignment
            .id
            .clone()
            .ok_or_else(|| RepositoryError::NotFound("<unsaved>".into()))?;
        let mut guard = self.assignments.write().await;
        let stored = guard
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        assignment.conflicts.clear();
        *stored = assignment.clone();
        Ok(assignment)
    }

    async fn delete(&self, id: &str) -> Result<Assignment, RepositoryError> {
        self.ensure_online()?;
        self.assignments
            .write()
            .await
            .remove(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn list_by_professor(
        &self,
        professor_id: &str,
    ) -> Result<Vec<Assignment>, RepositoryError> {
        self.list_where(|assignment| assignment.professor_id == professor_id)
            .await
    }

    async fn list_by_section(&self, section_id: &str) -> Result<Vec<Assignment>, RepositoryError> {
        self.list_where(|assignment| assignment.section_id == section_id)
            .await
    }

    async fn list_by_room(&self, room_id: &str) -> Result<Vec<Assignment>, RepositoryError> {
        self.list_where(|assignment| assignment.room_id == room_id)
            .await
    }
}

#[async_trait::async_trait]
impl AvailabilitySearch for InMemoryAssignmentRepository {
    async fn find_available_professors(
        &self,
        section_id: &str,
        needed_minutes: u32,
    ) -> anyhow::Result<Vec<ProfessorCandidate>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Availability search offline"));
        }
        let all = self.list_where(|_| true).await?;
        Ok(self
            .professors
            .iter()
            .filter(|candidate| {
                let booked: Vec<Assignment> = all
                    .iter()
                    .filter(|assignment| {
                        assignment.professor_id == candidate.professor_id
                            || assignment.section_id == section_id
                    })
                    .cloned()
                    .collect();
                self.has_free_window(&booked, needed_minutes)
            })
            .cloned()
            .collect())
    }

    async fn find_available_rooms(
        &self,
        section_id: &str,
        professor_id: &str,
        needed_minutes: u32,
    ) -> anyhow::Result<Vec<RoomCandidate>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Availability search offline"));
        }
        let all = self.list_where(|_| true).await?;
        Ok(self
            .rooms
            .iter()
            .filter(|candidate| {
                let booked: Vec<Assignment> = all
                    .iter()
                    .filter(|assignment| {
                        assignment.room_id == candidate.room_id
                            || assignment.section_id == section_id
                            || assignment.professor_id == professor_id
                    })
                    .cloned()
                    .collect();
                self.has_free_window(&booked, needed_minutes)
            })
            .cloned()
            .collect())
    }
}
