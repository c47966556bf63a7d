// Create command handler orchestrates the scheduling write flow.
//
// Responsibilities
// - Load the classes sharing the candidate's section, professor or room.
// - Call the decider with the command and the conflict policy in force.
// - Persist accepted assignments and hand back the stored row with its conflicts.
// - Enqueue a creation notification. Delivery failures are logged, never returned,
//   because the write has already happened.

use crate::adapters::outbound::notification_dispatch::dispatch_intents;
use crate::application::command_handlers::related_assignments::load_related;
use crate::application::errors::ApplicationError;
use crate::core::ports::{AssignmentRepository, NotificationOutbox};
use crate::core::schedule::assignment::Assignment;
use crate::core::schedule::config::ConflictPolicy;
use crate::core::schedule::decider::create::command::CreateAssignment;
use crate::core::schedule::decider::create::decide::decide_create;
use crate::core::schedule::decider::decision::Decision;
use crate::core::schedule::intents::ScheduleIntent;
use std::sync::Arc;
use tracing::{info, warn};

pub struct CreateAssignmentHandler<TRepository, TOutbox>
where
    TRepository: AssignmentRepository + 'static,
    TOutbox: NotificationOutbox + 'static,
{
    topic: String,
    repository: Arc<TRepository>,
    outbox: Arc<TOutbox>,
    policy: ConflictPolicy,
}

impl<TRepository, TOutbox> CreateAssignmentHandler<TRepository, TOutbox>
where
    TRepository: AssignmentRepository + 'static,
    TOutbox: NotificationOutbox + 'static,
{
    pub fn new(
        topic: impl Into<String>,
        repository: Arc<TRepository>,
        outbox: Arc<TOutbox>,
        policy: ConflictPolicy,
    ) -> Self {
        Self {
            topic: topic.into(),
            repository,
            outbox,
            policy,
        }
    }

    #[tracing::instrument(
        skip(self, command),
        fields(section_id = %command.section_id, day = %command.day_of_week)
    )]
    pub async fn handle(&self, command: CreateAssignment) -> Result<Assignment, ApplicationError> {
        let candidate = command.clone().into_assignment();
        let related = load_related(&*self.repository, &candidate).await?;

        match decide_create(&related, command, self.policy) {
            Decision::Accepted { assignment } => {
                let conflicts = assignment.conflicts.clone();
                let mut stored = self.repository.insert(assignment).await?;
                stored.conflicts = conflicts;
                info!(
                    assignment_id = stored.id.as_deref().unwrap_or_default(),
                    conflicts = stored.conflicts.len(),
                    "assignment created"
                );

                let intents = vec![ScheduleIntent::NotifyAssignmentCreated {
                    assignment: stored.clone(),
                }];
                if let Err(error) = dispatch_intents(&*self.outbox, &self.topic, intents).await {
                    warn!(%error, "failed to enqueue creation notification");
                }
                Ok(stored)
            }
            Decision::Rejected { reason } => Err(ApplicationError::Domain(reason)),
        }
    }
}

#[cfg(test)]
mod create_assignment_handler_tests {
    use super::*;
    use crate::adapters::in_memory::in_memory_assignment_repository::InMemoryAssignmentRepository;
    use crate::adapters::in_memory::in_memory_notification_outbox::InMemoryNotificationOutbox;
    use crate::core::ports::RepositoryError;
    use crate::core::schedule::assignment::ConflictKind;
    use crate::core::schedule::config::ScheduleConfig;
    use crate::core::schedule::decider::decision::DecideError;
    use crate::test_support::fixtures::assignments::{AssignmentBuilder, clock};
    use rstest::{fixture, rstest};

    const TOPIC: &str = "schedule";

    type BeforeEachReturn = (
        CreateAssignment,
        InMemoryAssignmentRepository,
        InMemoryNotificationOutbox,
    );

    #[fixture]
    fn before_each() -> BeforeEachReturn {
        let repository = InMemoryAssignmentRepository::new(ScheduleConfig::default());
        let outbox = InMemoryNotificationOutbox::new();
        let command = AssignmentBuilder::new().build().into();
        (command, repository, outbox)
    }

    fn room_clash() -> CreateAssignment {
        AssignmentBuilder::new()
            .professor("P-2", "Prof. Díaz")
            .section("S-2")
            .start_time(clock(7, 30))
            .end_time(clock(8, 0))
            .build()
            .into()
    }

    #[rstest]
    #[tokio::test]
    async fn handle_create_persists_and_enqueues(before_each: BeforeEachReturn) {
        let (command, repository, outbox) = before_each;
        let repository = Arc::new(repository);
        let outbox = Arc::new(outbox);
        let handler = CreateAssignmentHandler::new(
            TOPIC,
            repository.clone(),
            outbox.clone(),
            ConflictPolicy::Inform,
        );

        let stored = handler.handle(command).await.expect("handle failed");
        let id = stored.id.clone().expect("id assigned");
        assert!(stored.conflicts.is_empty());
        assert_eq!(repository.get(&id).await.unwrap(), stored);

        let rows = outbox.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event_type, "AssignmentCreated");
        assert_eq!(rows[0].assignment_id, id);
    }

    #[rstest]
    #[tokio::test]
    async fn handle_create_persists_conflicted_assignments_when_informing(
        before_each: BeforeEachReturn,
    ) {
        let (command, repository, outbox) = before_each;
        let repository = Arc::new(repository);
        let handler = CreateAssignmentHandler::new(
            TOPIC,
            repository.clone(),
            Arc::new(outbox),
            ConflictPolicy::Inform,
        );
        handler.handle(command).await.expect("first handle failed");

        let stored = handler.handle(room_clash()).await.expect("second handle failed");
        assert_eq!(stored.conflicts.len(), 1);
        assert_eq!(stored.conflicts[0].kind, ConflictKind::RoomConflict);

        // conflicts are derived: the stored row does not keep them
        let id = stored.id.expect("id assigned");
        assert!(repository.get(&id).await.unwrap().conflicts.is_empty());
        assert_eq!(repository.list_by_room("R-1").await.unwrap().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn handle_create_rejects_conflicts_without_writing_when_blocking(
        before_each: BeforeEachReturn,
    ) {
        let (command, repository, outbox) = before_each;
        let repository = Arc::new(repository);
        let outbox = Arc::new(outbox);
        let handler = CreateAssignmentHandler::new(
            TOPIC,
            repository.clone(),
            outbox.clone(),
            ConflictPolicy::Block,
        );
        handler.handle(command).await.expect("first handle failed");

        let result = handler.handle(room_clash()).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DecideError::Conflicting(ref conflicts)))
                if conflicts.len() == 1
        ));
        assert_eq!(repository.list_by_room("R-1").await.unwrap().len(), 1);
        assert_eq!(outbox.rows().await.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn handle_create_rejects_an_inverted_range(before_each: BeforeEachReturn) {
        let (_, repository, outbox) = before_each;
        let handler = CreateAssignmentHandler::new(
            TOPIC,
            Arc::new(repository),
            Arc::new(outbox),
            ConflictPolicy::Inform,
        );
        let command: CreateAssignment = AssignmentBuilder::new()
            .start_time(clock(9, 0))
            .end_time(clock(8, 15))
            .build()
            .into();
        let result = handler.handle(command).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            ApplicationError::Domain(DecideError::InvalidInterval).to_string()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn handle_create_fails_if_repository_is_offline(before_each: BeforeEachReturn) {
        let (command, mut repository, outbox) = before_each;
        repository.toggle_offline();
        let handler = CreateAssignmentHandler::new(
            TOPIC,
            Arc::new(repository),
            Arc::new(outbox),
            ConflictPolicy::Inform,
        );
        let result = handler.handle(command).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            ApplicationError::Repository(RepositoryError::Backend(
                "Assignment repository offline".into()
            ))
            .to_string()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn handle_create_succeeds_if_outbox_is_offline(before_each: BeforeEachReturn) {
        let (command, repository, mut outbox) = before_each;
        outbox.toggle_offline();
        let repository = Arc::new(repository);
        let handler = CreateAssignmentHandler::new(
            TOPIC,
            repository.clone(),
            Arc::new(outbox),
            ConflictPolicy::Inform,
        );
        let stored = handler.handle(command).await.expect("handle failed");
        assert!(stored.id.is_some());
        assert_eq!(repository.list_by_section("S-1").await.unwrap().len(), 1);
    }
}
