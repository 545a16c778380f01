//! PostgreSQL document-collection implementation of the notification store.
//!
//! One JSONB document per notification, keyed by a UUID `id` column, with a
//! `version` column for optimistic concurrency. Every mutating operation is
//! load → validate transition in-process → compare-and-swap save; a version
//! mismatch fails with a retryable [`ServiceError::Conflict`] instead of
//! silently letting the last writer win.
//!
//! Enum fields live inside the document as strings and timestamps as
//! RFC 3339, so queries go through JSONB operators rather than dedicated
//! columns.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, QueryBuilder};

use super::{NotificationStore, NotificationsFilter};
use crate::domain::{IdGenerator, NewNotification, Notification, NotificationId};
use crate::error::ServiceError;

/// Maps a compare-and-swap outcome to a result: zero rows touched means a
/// concurrent writer bumped the version (or removed the row) between our
/// load and save.
fn cas_outcome(id: NotificationId, rows_affected: u64) -> Result<(), ServiceError> {
    if rows_affected == 0 {
        return Err(ServiceError::Conflict(id));
    }
    Ok(())
}

/// PostgreSQL-backed notification store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
    ids: Arc<dyn IdGenerator>,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool and identity
    /// generator.
    #[must_use]
    pub fn new(pool: PgPool, ids: Arc<dyn IdGenerator>) -> Self {
        Self { pool, ids }
    }

    /// Loads a document and its version token.
    async fn load(&self, id: NotificationId) -> Result<(Notification, i64), ServiceError> {
        let row: Option<(serde_json::Value, i64)> =
            sqlx::query_as("SELECT doc, version FROM notifications WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| ServiceError::Persistence(e.to_string()))?;

        let (doc, version) = row.ok_or(ServiceError::NotFound(id))?;
        let notification =
            serde_json::from_value(doc).map_err(|e| ServiceError::Persistence(e.to_string()))?;
        Ok((notification, version))
    }

    /// Compare-and-swap save: succeeds only if nobody else bumped the
    /// version since [`Self::load`].
    async fn save(&self, notification: &Notification, version: i64) -> Result<(), ServiceError> {
        let doc = serde_json::to_value(notification)
            .map_err(|e| ServiceError::Persistence(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE notifications SET doc = $2, version = version + 1 \
             WHERE id = $1 AND version = $3",
        )
        .bind(notification.notification_id.as_uuid())
        .bind(doc)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(|e| ServiceError::Persistence(e.to_string()))?;

        cas_outcome(notification.notification_id, result.rows_affected())
    }
}

#[async_trait]
impl NotificationStore for PostgresStore {
    async fn create(&self, new: NewNotification) -> Result<NotificationId, ServiceError> {
        let id = self.ids.next_id();
        let notification = Notification::new(id, new, Utc::now());
        let doc = serde_json::to_value(&notification)
            .map_err(|e| ServiceError::Persistence(e.to_string()))?;

        sqlx::query("INSERT INTO notifications (id, doc) VALUES ($1, $2)")
            .bind(id.as_uuid())
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(|e| ServiceError::Persistence(e.to_string()))?;

        tracing::info!(%id, "notification created");
        Ok(id)
    }

    async fn get(&self, id: NotificationId) -> Result<Notification, ServiceError> {
        let (notification, _) = self.load(id).await?;
        Ok(notification)
    }

    async fn publish(&self, id: NotificationId) -> Result<(), ServiceError> {
        let (mut notification, version) = self.load(id).await?;
        notification.publish(Utc::now());
        self.save(&notification, version).await?;
        tracing::info!(%id, "notification published");
        Ok(())
    }

    async fn unpublish(&self, id: NotificationId) -> Result<Notification, ServiceError> {
        let (mut notification, version) = self.load(id).await?;
        notification.unpublish(Utc::now())?;
        self.save(&notification, version).await?;
        tracing::info!(%id, "notification unpublished");
        Ok(notification)
    }

    async fn delete(&self, id: NotificationId) -> Result<(), ServiceError> {
        let (notification, version) = self.load(id).await?;
        notification.ensure_deletable()?;

        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND version = $2")
            .bind(id.as_uuid())
            .bind(version)
            .execute(&self.pool)
            .await
            .map_err(|e| ServiceError::Persistence(e.to_string()))?;

        cas_outcome(id, result.rows_affected())?;
        tracing::info!(%id, "notification deleted");
        Ok(())
    }

    async fn active_notifications(
        &self,
        platform: &str,
    ) -> Result<Vec<Notification>, ServiceError> {
        let rows: Vec<(serde_json::Value,)> = sqlx::query_as(
            "SELECT doc FROM notifications \
             WHERE doc->'platforms' @> to_jsonb($1::text) \
               AND doc->>'status' = 'Published' \
               AND (doc->>'validFrom')::timestamptz < $2 \
               AND (doc->>'validTo')::timestamptz > $2 \
             ORDER BY id",
        )
        .bind(platform)
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::Persistence(e.to_string()))?;

        rows.into_iter()
            .map(|(doc,)| {
                serde_json::from_value(doc).map_err(|e| ServiceError::Persistence(e.to_string()))
            })
            .collect()
    }

    async fn notifications(
        &self,
        filter: NotificationsFilter,
    ) -> Result<Vec<Notification>, ServiceError> {
        let mut query = QueryBuilder::<sqlx::Postgres>::new("SELECT doc FROM notifications");
        let mut prefix = " WHERE ";

        if let Some(status) = filter.status {
            query.push(prefix).push("doc->>'status' = ");
            query.push_bind(status.as_str());
            prefix = " AND ";
        }
        if let Some(from) = filter.valid_from {
            query.push(prefix).push("(doc->>'validFrom')::timestamptz >= ");
            query.push_bind(from);
            prefix = " AND ";
        }
        if let Some(to) = filter.valid_to {
            query.push(prefix).push("(doc->>'validTo')::timestamptz <= ");
            query.push_bind(to);
        }

        query.push(
            " ORDER BY (doc->>'validFrom')::timestamptz DESC, \
             (doc->>'validTo')::timestamptz DESC LIMIT ",
        );
        query.push_bind(i64::try_from(filter.limit).unwrap_or(i64::MAX));

        let rows: Vec<(serde_json::Value,)> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ServiceError::Persistence(e.to_string()))?;

        rows.into_iter()
            .map(|(doc,)| {
                serde_json::from_value(doc).map_err(|e| ServiceError::Persistence(e.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn stale_version_save_is_a_conflict() {
        let id = NotificationId::new();
        let Err(ServiceError::Conflict(conflicted)) = cas_outcome(id, 0) else {
            panic!("zero rows affected should report a conflict");
        };
        assert_eq!(conflicted, id);
    }

    #[test]
    fn matched_version_save_succeeds() {
        assert!(cas_outcome(NotificationId::new(), 1).is_ok());
    }
}
