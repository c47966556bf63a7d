use crate::core::ports::{NotificationOutbox, NotificationRow, OutboxError};
use crate::core::schedule::intents::ScheduleIntent;
use chrono::Utc;
use serde_json::json;

/// Translate schedule intents into outbox rows and enqueue them in order.
pub async fn dispatch_intents(
    outbox: &impl NotificationOutbox,
    topic: &str,
    intents: Vec<ScheduleIntent>,
) -> Result<(), OutboxError> {
    for intent in intents {
        let (event_type, assignment_id, payload) = match intent {
            ScheduleIntent::NotifyAssignmentCreated { assignment } => (
                "AssignmentCreated",
                assignment.id.clone(),
                json!({ "assignment": serde_json::to_value(&assignment)? }),
            ),
            ScheduleIntent::NotifyAssignmentRescheduled {
                previous,
                assignment,
            } => (
                "AssignmentRescheduled",
                assignment.id.clone(),
                json!({
                    "previous": serde_json::to_value(&previous)?,
                    "assignment": serde_json::to_value(&assignment)?,
                }),
            ),
            ScheduleIntent::NotifyAssignmentDeleted { assignment } => (
                "AssignmentDeleted",
                assignment.id.clone(),
                json!({ "assignment": serde_json::to_value(&assignment)? }),
            ),
        };
        outbox
            .enqueue(NotificationRow {
                topic: topic.to_string(),
                event_type: event_type.to_string(),
                assignment_id: assignment_id.unwrap_or_default(),
                occurred_at: Utc::now().timestamp_millis(),
                payload,
            })
            .await?;
    }
    Ok(())
}
