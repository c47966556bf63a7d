// Delete command handler.
//
// Responsibilities
// - Remove the assignment. No conflict recomputation: grids are rebuilt on the next read.
// - Enqueue a deletion notification with a snapshot of what was removed.

use crate::adapters::outbound::notification_dispatch::dispatch_intents;
use crate::application::errors::ApplicationError;
use crate::core::ports::{AssignmentRepository, NotificationOutbox};
use crate::core::schedule::assignment::AssignmentSnapshot;
use crate::core::schedule::intents::ScheduleIntent;
use std::sync::Arc;
use tracing::{info, warn};

pub struct DeleteAssignmentHandler<TRepository, TOutbox>
where
    TRepository: AssignmentRepository + 'static,
    TOutbox: NotificationOutbox + 'static,
{
    topic: String,
    repository: Arc<TRepository>,
    outbox: Arc<TOutbox>,
}

impl<TRepository, TOutbox> DeleteAssignmentHandler<TRepository, TOutbox>
where
    TRepository: AssignmentRepository + 'static,
    TOutbox: NotificationOutbox + 'static,
{
    pub fn new(topic: impl Into<String>, repository: Arc<TRepository>, outbox: Arc<TOutbox>) -> Self {
        Self {
            topic: topic.into(),
            repository,
            outbox,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn handle(&self, assignment_id: &str) -> Result<AssignmentSnapshot, ApplicationError> {
        let removed = self.repository.delete(assignment_id).await?.snapshot();
        info!("assignment deleted");

        let intents = vec![ScheduleIntent::NotifyAssignmentDeleted {
            assignment: removed.clone(),
        }];
        if let Err(error) = dispatch_intents(&*self.outbox, &self.topic, intents).await {
            warn!(%error, "failed to enqueue deletion notification");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod delete_assignment_handler_tests {
    use super::*;
    use crate::adapters::in_memory::in_memory_assignment_repository::InMemoryAssignmentRepository;
    use crate::adapters::in_memory::in_memory_notification_outbox::InMemoryNotificationOutbox;
    use crate::core::ports::RepositoryError;
    use crate::core::schedule::config::ScheduleConfig;
    use crate::test_support::fixtures::assignments::AssignmentBuilder;
    use rstest::{fixture, rstest};

    const TOPIC: &str = "schedule";

    #[fixture]
    fn repository() -> InMemoryAssignmentRepository {
        InMemoryAssignmentRepository::new(ScheduleConfig::default())
    }

    #[rstest]
    #[tokio::test]
    async fn handle_delete_removes_and_enqueues(repository: InMemoryAssignmentRepository) {
        repository
            .insert(AssignmentBuilder::new().id("a-1").build())
            .await
            .unwrap();
        let repository = Arc::new(repository);
        let outbox = Arc::new(InMemoryNotificationOutbox::new());
        let handler = DeleteAssignmentHandler::new(TOPIC, repository.clone(), outbox.clone());

        let removed = handler.handle("a-1").await.expect("handle failed");
        assert_eq!(removed.id.as_deref(), Some("a-1"));
        assert_eq!(removed.course_name, "Calculus I");
        assert!(repository.list_by_section("S-1").await.unwrap().is_empty());

        let rows = outbox.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event_type, "AssignmentDeleted");
    }

    #[rstest]
    #[tokio::test]
    async fn handle_delete_fails_for_an_unknown_assignment(
        repository: InMemoryAssignmentRepository,
    ) {
        let outbox = Arc::new(InMemoryNotificationOutbox::new());
        let handler = DeleteAssignmentHandler::new(TOPIC, Arc::new(repository), outbox.clone());
        let result = handler.handle("missing").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            ApplicationError::Repository(RepositoryError::NotFound("missing".into())).to_string()
        );
        assert!(outbox.rows().await.is_empty());
    }
}
