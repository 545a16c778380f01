//! Type-safe notification identifier and pluggable id generation.
//!
//! [`NotificationId`] is a newtype wrapper around [`uuid::Uuid`] (v4) so that
//! notification identifiers cannot be confused with other UUIDs. Generation
//! goes through the [`IdGenerator`] capability, which is injected into the
//! store rather than baked into the entity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a notification.
///
/// Wraps a UUID v4. Assigned once by the store at creation time and
/// immutable thereafter. Doubles as the document key in the backing
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(uuid::Uuid);

impl NotificationId {
    /// Creates a new random `NotificationId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `NotificationId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for NotificationId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<NotificationId> for uuid::Uuid {
    fn from(id: NotificationId) -> Self {
        id.0
    }
}

/// Identity assignment capability injected into the store.
///
/// Decouples the identity scheme from both the entity and the store so a
/// deployment can swap in a different generator without touching either.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    /// Returns a fresh, never-before-issued identifier.
    fn next_id(&self) -> NotificationId;
}

/// Default [`IdGenerator`]: random UUID v4 per notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> NotificationId {
        NotificationId::new()
    }
}
