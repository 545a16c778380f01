//! The notification entity and its lifecycle transition rules.
//!
//! A notification moves `Draft → Published → Unpublished`; deletion is only
//! legal from `Draft`. All transition validation lives here as pure logic —
//! the store calls into these methods, the backing document collection never
//! sees the state machine.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::NotificationId;
use crate::error::ServiceError;

/// Lifecycle status of a notification.
///
/// Persisted as the variant name string for forward-compatible schema
/// evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationStatus {
    /// Initial status; not visible to end users; deletable.
    Draft,
    /// Visible to end users matching platform and time-window filters.
    Published,
    /// Previously published, now withdrawn; retained for history.
    Unpublished,
}

impl NotificationStatus {
    /// Returns the persisted string form of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Unpublished => "Unpublished",
        }
    }
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How prominently a notification should be rendered by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Informational announcement.
    Information,
    /// Something users should pay attention to.
    Warning,
    /// Service-impacting problem.
    Error,
}

/// A labeled absolute URL attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationLink {
    /// Human-readable link text.
    pub label: String,
    /// Absolute URL (validated upstream).
    pub url: String,
}

/// Caller-supplied fields for a new notification.
///
/// Inputs are assumed already validated (non-empty title/body/platforms,
/// well-formed window and links) — validation is the API layer's job.
#[derive(Debug, Clone)]
pub struct NewNotification {
    /// Start of the active window; defaults to creation time.
    pub valid_from: Option<DateTime<Utc>>,
    /// End of the active window; defaults to [`far_future`].
    pub valid_to: Option<DateTime<Utc>>,
    /// Rendering severity.
    pub severity: Severity,
    /// Short headline.
    pub title: String,
    /// Markdown body.
    pub body_md: String,
    /// Client surfaces that may display the notification.
    pub platforms: Vec<String>,
    /// User roles the notification is aimed at (advisory metadata).
    pub roles: Vec<String>,
    /// Whether the end user may dismiss it.
    pub can_close: bool,
    /// Ordered call-to-action links.
    pub links: Vec<NotificationLink>,
}

/// The sentinel used when no `valid_to` is supplied: effectively infinite.
#[must_use]
pub fn far_future() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(9999, 12, 31, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// A single announcement record with a lifecycle and visibility scope.
///
/// Serialized as one document in the backing collection (camelCase field
/// names, enums as strings, timestamps RFC 3339). All timestamps are UTC;
/// zone presentation is a serialization-boundary concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Store-assigned identity, immutable once set.
    pub notification_id: NotificationId,
    /// Current lifecycle status; only moved by transition methods.
    pub status: NotificationStatus,
    /// Rendering severity.
    pub severity: Severity,
    /// Short headline.
    pub title: String,
    /// Markdown body.
    pub body_md: String,
    /// Client surfaces that may display the notification.
    pub platforms: Vec<String>,
    /// User roles the notification is aimed at (not enforced by the store).
    pub roles: Vec<String>,
    /// Start of the active window (exclusive at the instant itself).
    pub valid_from: DateTime<Utc>,
    /// End of the active window (exclusive at the instant itself).
    pub valid_to: DateTime<Utc>,
    /// Whether the end user may dismiss it.
    pub can_close: bool,
    /// Ordered call-to-action links.
    pub links: Vec<NotificationLink>,
    /// Creation timestamp, set once by the store.
    pub created: DateTime<Utc>,
    /// Refreshed by the store on every mutating operation.
    pub last_modified: DateTime<Utc>,
}

impl Notification {
    /// Builds a fresh Draft notification from caller-supplied fields.
    #[must_use]
    pub fn new(id: NotificationId, new: NewNotification, now: DateTime<Utc>) -> Self {
        Self {
            notification_id: id,
            status: NotificationStatus::Draft,
            severity: new.severity,
            title: new.title,
            body_md: new.body_md,
            platforms: new.platforms,
            roles: new.roles,
            valid_from: new.valid_from.unwrap_or(now),
            valid_to: new.valid_to.unwrap_or_else(far_future),
            can_close: new.can_close,
            links: new.links,
            created: now,
            last_modified: now,
        }
    }

    /// Transitions to `Published` and touches `last_modified`.
    ///
    /// Publishing carries no status precondition: re-publishing an already
    /// published or withdrawn notification is allowed and idempotent apart
    /// from the `last_modified` refresh.
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.status = NotificationStatus::Published;
        self.last_modified = now;
    }

    /// Transitions to `Unpublished` and touches `last_modified`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidStatus`] when the current status is
    /// not `Published`.
    pub fn unpublish(&mut self, now: DateTime<Utc>) -> Result<(), ServiceError> {
        if self.status != NotificationStatus::Published {
            return Err(ServiceError::InvalidStatus {
                id: self.notification_id,
                current: self.status,
                expected: NotificationStatus::Published,
            });
        }
        self.status = NotificationStatus::Unpublished;
        self.last_modified = now;
        Ok(())
    }

    /// Checks the delete precondition: only Draft notifications may go.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidStatus`] when the current status is
    /// not `Draft`.
    pub fn ensure_deletable(&self) -> Result<(), ServiceError> {
        if self.status != NotificationStatus::Draft {
            return Err(ServiceError::InvalidStatus {
                id: self.notification_id,
                current: self.status,
                expected: NotificationStatus::Draft,
            });
        }
        Ok(())
    }

    /// Whether this notification is visible on `platform` at `now`.
    ///
    /// Active means Published, platform member, and `valid_from < now <
    /// valid_to` — strict on both ends, so a notification is not yet active
    /// at `valid_from` itself and no longer active at `valid_to` itself.
    #[must_use]
    pub fn is_active_on(&self, platform: &str, now: DateTime<Utc>) -> bool {
        self.status == NotificationStatus::Published
            && self.platforms.iter().any(|p| p == platform)
            && self.valid_from < now
            && now < self.valid_to
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn make_new() -> NewNotification {
        NewNotification {
            valid_from: None,
            valid_to: None,
            severity: Severity::Information,
            title: "Scheduled maintenance".to_string(),
            body_md: "The service will be **unavailable** tonight.".to_string(),
            platforms: vec!["geoit".to_string()],
            roles: vec!["admin".to_string()],
            can_close: true,
            links: vec![NotificationLink {
                label: "Status page".to_string(),
                url: "https://status.example.com".to_string(),
            }],
        }
    }

    #[test]
    fn new_starts_as_draft_with_defaults() {
        let now = Utc::now();
        let n = Notification::new(NotificationId::new(), make_new(), now);
        assert_eq!(n.status, NotificationStatus::Draft);
        assert_eq!(n.valid_from, now);
        assert_eq!(n.valid_to, far_future());
        assert_eq!(n.created, now);
        assert_eq!(n.last_modified, now);
    }

    #[test]
    fn explicit_window_is_kept() {
        let now = Utc::now();
        let from = now - Duration::days(1);
        let to = now + Duration::days(1);
        let mut new = make_new();
        new.valid_from = Some(from);
        new.valid_to = Some(to);
        let n = Notification::new(NotificationId::new(), new, now);
        assert_eq!(n.valid_from, from);
        assert_eq!(n.valid_to, to);
    }

    #[test]
    fn publish_touches_last_modified() {
        let created = Utc::now();
        let mut n = Notification::new(NotificationId::new(), make_new(), created);
        let later = created + Duration::seconds(5);
        n.publish(later);
        assert_eq!(n.status, NotificationStatus::Published);
        assert!(n.last_modified > created);
        assert_eq!(n.created, created);
    }

    #[test]
    fn republish_is_allowed_from_any_status() {
        let now = Utc::now();
        let mut n = Notification::new(NotificationId::new(), make_new(), now);
        n.publish(now);
        let Ok(()) = n.unpublish(now + Duration::seconds(1)) else {
            panic!("unpublish of published notification failed");
        };
        n.publish(now + Duration::seconds(2));
        assert_eq!(n.status, NotificationStatus::Published);
    }

    #[test]
    fn unpublish_requires_published() {
        let now = Utc::now();
        let mut n = Notification::new(NotificationId::new(), make_new(), now);
        let Err(ServiceError::InvalidStatus {
            current, expected, ..
        }) = n.unpublish(now)
        else {
            panic!("unpublish of draft should fail");
        };
        assert_eq!(current, NotificationStatus::Draft);
        assert_eq!(expected, NotificationStatus::Published);
    }

    #[test]
    fn only_drafts_are_deletable() {
        let now = Utc::now();
        let mut n = Notification::new(NotificationId::new(), make_new(), now);
        assert!(n.ensure_deletable().is_ok());

        n.publish(now);
        let Err(ServiceError::InvalidStatus { current, .. }) = n.ensure_deletable() else {
            panic!("delete of published should fail");
        };
        assert_eq!(current, NotificationStatus::Published);
    }

    #[test]
    fn active_window_is_strict_on_both_ends() {
        let now = Utc::now();
        let mut new = make_new();
        new.valid_from = Some(now - Duration::hours(1));
        new.valid_to = Some(now);
        let mut n = Notification::new(NotificationId::new(), new, now - Duration::hours(1));
        n.publish(now - Duration::hours(1));

        // valid_to == now: no longer active
        assert!(!n.is_active_on("geoit", now));
        // strictly inside the window: active
        assert!(n.is_active_on("geoit", now - Duration::minutes(30)));
        // valid_from == now: not yet active
        assert!(!n.is_active_on("geoit", n.valid_from));
    }

    #[test]
    fn active_requires_platform_membership_and_published() {
        let now = Utc::now();
        let mut n = Notification::new(NotificationId::new(), make_new(), now - Duration::hours(1));
        assert!(!n.is_active_on("geoit", now)); // still Draft
        n.publish(now);
        assert!(n.is_active_on("geoit", now));
        assert!(!n.is_active_on("lara", now));
    }

    #[test]
    fn status_persists_as_string() {
        let json = serde_json::to_string(&NotificationStatus::Unpublished).ok();
        assert_eq!(json.as_deref(), Some("\"Unpublished\""));
    }

    #[test]
    fn document_round_trip_preserves_fields() {
        let now = Utc::now();
        let n = Notification::new(NotificationId::new(), make_new(), now);
        let Ok(doc) = serde_json::to_value(&n) else {
            panic!("serialization failed");
        };
        assert!(doc.get("notificationId").is_some());
        assert!(doc.get("bodyMd").is_some());
        let Ok(back) = serde_json::from_value::<Notification>(doc) else {
            panic!("deserialization failed");
        };
        assert_eq!(back, n);
    }
}
