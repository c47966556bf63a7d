// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe the persistence, availability search and notification collaborators as traits.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the adapters layer.
//
// Testing guidance
// - In memory implementations live in adapters/in_memory for tests and local development.

use crate::core::schedule::assignment::Assignment;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("assignment {0} not found")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Persistence collaborator. Stored assignments never carry conflicts: those are derived.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn get(&self, id: &str) -> Result<Assignment, RepositoryError>;
    async fn insert(&self, assignment: Assignment) -> Result<Assignment, RepositoryError>;
    async fn update(&self, assignment: Assignment) -> Result<Assignment, RepositoryError>;
    async fn delete(&self, id: &str) -> Result<Assignment, RepositoryError>;
    async fn list_by_professor(&self, professor_id: &str)
    -> Result<Vec<Assignment>, RepositoryError>;
    async fn list_by_section(&self, section_id: &str) -> Result<Vec<Assignment>, RepositoryError>;
    async fn list_by_room(&self, room_id: &str) -> Result<Vec<Assignment>, RepositoryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessorCandidate {
    pub professor_id: String,
    pub professor_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCandidate {
    pub room_id: String,
    pub room_code: String,
}

/// Availability search owned by the database layer. The core only consumes its candidates.
#[async_trait]
pub trait AvailabilitySearch: Send + Sync {
    async fn find_available_professors(
        &self,
        section_id: &str,
        needed_minutes: u32,
    ) -> anyhow::Result<Vec<ProfessorCandidate>>;

    async fn find_available_rooms(
        &self,
        section_id: &str,
        professor_id: &str,
        needed_minutes: u32,
    ) -> anyhow::Result<Vec<RoomCandidate>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRow {
    pub topic: String,
    pub event_type: String,
    pub assignment_id: String,
    pub occurred_at: i64,
    pub payload: Json,
}

#[derive(Debug, Error)]
pub enum OutboxError {
    #[error("failed to serialize notification payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Notification collaborator. Rows are delivered to other users outside this crate.
#[async_trait]
pub trait NotificationOutbox: Send + Sync {
    async fn enqueue(&self, row: NotificationRow) -> Result<(), OutboxError>;
}
