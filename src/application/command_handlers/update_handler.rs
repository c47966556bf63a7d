// Reschedule command handler orchestrates moving an existing class.
//
// Responsibilities
// - Load the current assignment and the classes sharing its resources.
// - Call the decider, which ignores the assignment's previous self.
// - Persist the moved assignment and return it with its recomputed conflicts.
// - Enqueue a reschedule notification carrying the previous placement.

use crate::adapters::outbound::notification_dispatch::dispatch_intents;
use crate::application::command_handlers::related_assignments::load_related;
use crate::application::errors::ApplicationError;
use crate::core::ports::{AssignmentRepository, NotificationOutbox};
use crate::core::schedule::assignment::Assignment;
use crate::core::schedule::config::ConflictPolicy;
use crate::core::schedule::decider::decision::Decision;
use crate::core::schedule::decider::reschedule::command::RescheduleAssignment;
use crate::core::schedule::decider::reschedule::decide::decide_reschedule;
use crate::core::schedule::intents::ScheduleIntent;
use std::sync::Arc;
use tracing::{info, warn};

pub struct RescheduleAssignmentHandler<TRepository, TOutbox>
where
    TRepository: AssignmentRepository + 'static,
    TOutbox: NotificationOutbox + 'static,
{
    topic: String,
    repository: Arc<TRepository>,
    outbox: Arc<TOutbox>,
    policy: ConflictPolicy,
}

impl<TRepository, TOutbox> RescheduleAssignmentHandler<TRepository, TOutbox>
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

    #[tracing::instrument(skip(self, command), fields(assignment_id = %command.assignment_id))]
    pub async fn handle(
        &self,
        command: RescheduleAssignment,
    ) -> Result<Assignment, ApplicationError> {
        let current = self.repository.get(&command.assignment_id).await?;
        let related = load_related(&*self.repository, &current).await?;

        match decide_reschedule(&current, &related, command, self.policy) {
            Decision::Accepted { assignment } => {
                let conflicts = assignment.conflicts.clone();
                let mut stored = self.repository.update(assignment).await?;
                stored.conflicts = conflicts;
                info!(
                    day = %stored.day_of_week,
                    range = %stored.time_range_label(),
                    conflicts = stored.conflicts.len(),
                    "assignment rescheduled"
                );

                let intents = vec![ScheduleIntent::NotifyAssignmentRescheduled {
                    previous: current.snapshot(),
                    assignment: stored.clone(),
                }];
                if let Err(error) = dispatch_intents(&*self.outbox, &self.topic, intents).await {
                    warn!(%error, "failed to enqueue reschedule notification");
                }
                Ok(stored)
            }
            Decision::Rejected { reason } => Err(ApplicationError::Domain(reason)),
        }
    }
}
