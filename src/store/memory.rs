//! In-memory implementation of the notification store.
//!
//! Backs unit tests and persistence-disabled runs. A single
//! `tokio::sync::RwLock` around a `BTreeMap` makes every operation atomic,
//! so no version tokens are needed; the `BTreeMap` keeps iteration order
//! stable across calls, which is what the active listing promises.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{NotificationStore, NotificationsFilter};
use crate::domain::{IdGenerator, NewNotification, Notification, NotificationId};
use crate::error::ServiceError;

/// Notification store held entirely in process memory.
#[derive(Debug)]
pub struct MemoryStore {
    ids: Arc<dyn IdGenerator>,
    entries: RwLock<BTreeMap<NotificationId, Notification>>,
}

impl MemoryStore {
    /// Creates an empty store using the given identity generator.
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            ids,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Returns the number of stored notifications.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if the store holds no notifications.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn create(&self, new: NewNotification) -> Result<NotificationId, ServiceError> {
        let id = self.ids.next_id();
        let notification = Notification::new(id, new, Utc::now());
        self.entries.write().await.insert(id, notification);
        tracing::info!(%id, "notification created");
        Ok(id)
    }

    async fn get(&self, id: NotificationId) -> Result<Notification, ServiceError> {
        self.entries
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ServiceError::NotFound(id))
    }

    async fn publish(&self, id: NotificationId) -> Result<(), ServiceError> {
        let mut entries = self.entries.write().await;
        let notification = entries.get_mut(&id).ok_or(ServiceError::NotFound(id))?;
        notification.publish(Utc::now());
        tracing::info!(%id, "notification published");
        Ok(())
    }

    async fn unpublish(&self, id: NotificationId) -> Result<Notification, ServiceError> {
        let mut entries = self.entries.write().await;
        let notification = entries.get_mut(&id).ok_or(ServiceError::NotFound(id))?;
        notification.unpublish(Utc::now())?;
        tracing::info!(%id, "notification unpublished");
        Ok(notification.clone())
    }

    async fn delete(&self, id: NotificationId) -> Result<(), ServiceError> {
        let mut entries = self.entries.write().await;
        let notification = entries.get(&id).ok_or(ServiceError::NotFound(id))?;
        notification.ensure_deletable()?;
        entries.remove(&id);
        tracing::info!(%id, "notification deleted");
        Ok(())
    }

    async fn active_notifications(
        &self,
        platform: &str,
    ) -> Result<Vec<Notification>, ServiceError> {
        let now = Utc::now();
        let entries = self.entries.read().await;
        Ok(entries
            .values()
            .filter(|n| n.is_active_on(platform, now))
            .cloned()
            .collect())
    }

    async fn notifications(
        &self,
        filter: NotificationsFilter,
    ) -> Result<Vec<Notification>, ServiceError> {
        let entries = self.entries.read().await;
        let mut matched: Vec<Notification> = entries
            .values()
            .filter(|n| {
                filter.status.is_none_or(|s| n.status == s)
                    && filter.valid_from.is_none_or(|from| n.valid_from >= from)
                    && filter.valid_to.is_none_or(|to| n.valid_to <= to)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            b.valid_from
                .cmp(&a.valid_from)
                .then(b.valid_to.cmp(&a.valid_to))
        });
        matched.truncate(filter.limit);
        Ok(matched)
    }
}
