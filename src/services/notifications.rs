//! Notification service
//!
//! Creates and deletes notifications and broadcasts every change to
//! subscribers of the `notificationChange` GraphQL subscription.

use anyhow::Result;
use tokio::sync::broadcast;
use tracing::debug;

use crate::db::{CreateNotification, Database, NotificationRecord};

/// Broadcast channel capacity; slower subscribers skip older events
const CHANNEL_CAPACITY: usize = 256;

/// In-process pub/sub for notification changes
#[derive(Clone)]
pub struct NotificationEvents {
    tx: broadcast::Sender<NotificationRecord>,
}

impl NotificationEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a change. Returns the number of subscribers that received it.
    pub fn publish(&self, notification: NotificationRecord) -> usize {
        match self.tx.send(notification) {
            Ok(receivers) => receivers,
            Err(_) => {
                debug!("No notification subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationRecord> {
        self.tx.subscribe()
    }
}

impl Default for NotificationEvents {
    fn default() -> Self {
        Self::new(CHANNEL_CAPACITY)
    }
}

/// Service for notification writes that must be broadcast
#[derive(Clone)]
pub struct NotificationService {
    db: Database,
    events: NotificationEvents,
}

impl NotificationService {
    pub fn new(db: Database, events: NotificationEvents) -> Self {
        Self { db, events }
    }

    /// Create a notification and broadcast it
    pub async fn create(&self, input: CreateNotification) -> Result<NotificationRecord> {
        let notification = self.db.notifications().create(input).await?;
        let receivers = self.events.publish(notification.clone());
        debug!(notification_id = notification.id, receivers, "Notification created");
        Ok(notification)
    }

    /// Delete a notification and broadcast the removed row
    pub async fn delete(&self, id: i64) -> Result<Option<NotificationRecord>> {
        let removed = self.db.notifications().delete(id).await?;
        if let Some(ref notification) = removed {
            let receivers = self.events.publish(notification.clone());
            debug!(notification_id = id, receivers, "Notification deleted");
        }
        Ok(removed)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationRecord> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let events = NotificationEvents::default();
        let db = Database::in_memory().await.unwrap();
        let record = db
            .notifications()
            .create(CreateNotification {
                title: "t".to_string(),
                text: "x".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(events.publish(record), 0);
    }

    #[tokio::test]
    async fn test_create_and_delete_are_broadcast() {
        let db = Database::in_memory().await.unwrap();
        let service = NotificationService::new(db, NotificationEvents::default());
        let mut rx = service.subscribe();

        let created = service
            .create(CreateNotification {
                title: "Build finished".to_string(),
                text: "All green".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(rx.recv().await.unwrap(), created);

        let removed = service.delete(created.id).await.unwrap().unwrap();
        assert_eq!(rx.recv().await.unwrap(), removed);

        // Deleting a missing row publishes nothing
        assert!(service.delete(created.id).await.unwrap().is_none());
        assert!(rx.try_recv().is_err());
    }
}
