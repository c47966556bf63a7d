// In memory implementation of the NotificationOutbox port.
//
// Purpose
// - Capture notification rows in tests and local development instead of delivering them.

use crate::core::ports::{NotificationOutbox, NotificationRow, OutboxError};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryNotificationOutbox {
    rows: Mutex<Vec<NotificationRow>>,
    is_offline: bool,
}

impl InMemoryNotificationOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn rows(&self) -> Vec<NotificationRow> {
        self.rows.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl NotificationOutbox for InMemoryNotificationOutbox {
    async fn enqueue(&self, row: NotificationRow) -> Result<(), OutboxError> {
        if self.is_offline {
            return Err(OutboxError::Backend("Notification outbox offline".into()));
        }
        self.rows.lock().await.push(row);
        Ok(())
    }
}
