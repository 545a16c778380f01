//! Store layer: persistence of notifications and the state machine guard.
//!
//! [`NotificationStore`] is the repository contract consumed by the API
//! layer. Implementations load documents from the backing collection, apply
//! the lifecycle transitions from [`crate::domain`] in-process, and save the
//! result — the document engine itself never sees the state machine.
//!
//! Two implementations exist: [`postgres::PostgresStore`] (one JSONB
//! document per notification, optimistic concurrency via a version column)
//! and [`memory::MemoryStore`] for tests and persistence-disabled runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::domain::{NewNotification, Notification, NotificationId, NotificationStatus};
use crate::error::ServiceError;

/// Default result cap for [`NotificationStore::notifications`].
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Filters for the historical notification listing.
///
/// The timestamp filters are absolute bounds, not a window-containment test:
/// `valid_from` keeps entities whose `valid_from >=` the given value, and
/// `valid_to` keeps entities whose `valid_to <=` the given value (both
/// inclusive). This asymmetry matches the query surface the listing exposes.
#[derive(Debug, Clone)]
pub struct NotificationsFilter {
    /// Exact status match, when given.
    pub status: Option<NotificationStatus>,
    /// Inclusive lower bound on `valid_from`.
    pub valid_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `valid_to`.
    pub valid_to: Option<DateTime<Utc>>,
    /// Maximum number of results; caller discipline only.
    pub limit: usize,
}

impl Default for NotificationsFilter {
    fn default() -> Self {
        Self {
            status: None,
            valid_from: None,
            valid_to: None,
            limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

/// Repository contract for the notification lifecycle.
///
/// Each operation is a short-lived unit of work against the backing store;
/// there is no cross-operation transaction. Inputs are assumed validated
/// upstream; all failures surface as [`ServiceError`], never as
/// store-specific errors.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug {
    /// Inserts a new Draft notification and returns its assigned identity.
    ///
    /// Not idempotent: each call creates a new entity.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Persistence`] on store failure.
    async fn create(&self, new: NewNotification) -> Result<NotificationId, ServiceError>;

    /// Loads a single notification by identity.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no such notification exists.
    async fn get(&self, id: NotificationId) -> Result<Notification, ServiceError>;

    /// Sets the status to Published and refreshes `last_modified`.
    ///
    /// Publishing has no status precondition beyond existence: re-publishing
    /// is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no such notification exists,
    /// or [`ServiceError::Conflict`] when a concurrent writer got there
    /// first.
    async fn publish(&self, id: NotificationId) -> Result<(), ServiceError>;

    /// Sets the status to Unpublished, refreshes `last_modified`, and
    /// returns the updated entity.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no such notification exists,
    /// [`ServiceError::InvalidStatus`] when the current status is not
    /// Published, or [`ServiceError::Conflict`] on a concurrent write.
    async fn unpublish(&self, id: NotificationId) -> Result<Notification, ServiceError>;

    /// Permanently removes a Draft notification.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no such notification exists,
    /// [`ServiceError::InvalidStatus`] when the current status is not Draft,
    /// or [`ServiceError::Conflict`] on a concurrent write.
    async fn delete(&self, id: NotificationId) -> Result<(), ServiceError>;

    /// Returns all notifications currently visible on `platform`: Published,
    /// platform member, and `valid_from < now < valid_to` (strict).
    ///
    /// Ordered ascending by identity — stable across calls with unchanged
    /// data.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Persistence`] on store failure.
    async fn active_notifications(&self, platform: &str)
    -> Result<Vec<Notification>, ServiceError>;

    /// Returns historical notifications matching `filter`, sorted by
    /// `valid_from` descending (ties: `valid_to` descending), truncated to
    /// `filter.limit`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Persistence`] on store failure.
    async fn notifications(
        &self,
        filter: NotificationsFilter,
    ) -> Result<Vec<Notification>, ServiceError>;
}
