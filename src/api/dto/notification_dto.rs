//! Notification DTOs for create, list, and detail operations.
//!
//! Wire names are camelCase; enums travel as their string names. DTOs stay
//! plain serde types — the store never sees framework or wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    NewNotification, Notification, NotificationId, NotificationLink, NotificationStatus, Severity,
};
use crate::store::{DEFAULT_QUERY_LIMIT, NotificationsFilter};

/// A labeled link as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkDto {
    /// Human-readable link text.
    pub label: String,
    /// Absolute URL.
    pub url: String,
}

impl From<LinkDto> for NotificationLink {
    fn from(dto: LinkDto) -> Self {
        Self {
            label: dto.label,
            url: dto.url,
        }
    }
}

impl From<NotificationLink> for LinkDto {
    fn from(link: NotificationLink) -> Self {
        Self {
            label: link.label,
            url: link.url,
        }
    }
}

/// Request body for `POST /notifications`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    /// Start of the active window; defaults to creation time.
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    /// End of the active window; defaults to a far-future sentinel.
    #[serde(default)]
    pub valid_to: Option<DateTime<Utc>>,
    /// Rendering severity.
    #[schema(value_type = String)]
    pub severity: Severity,
    /// Short headline.
    pub title: String,
    /// Markdown body.
    pub body_md: String,
    /// Client surfaces that may display the notification.
    pub platforms: Vec<String>,
    /// User roles the notification is aimed at.
    pub roles: Vec<String>,
    /// Whether the end user may dismiss it.
    #[serde(default)]
    pub can_close: bool,
    /// Ordered call-to-action links.
    #[serde(default)]
    pub links: Vec<LinkDto>,
}

impl From<CreateNotificationRequest> for NewNotification {
    fn from(req: CreateNotificationRequest) -> Self {
        Self {
            valid_from: req.valid_from,
            valid_to: req.valid_to,
            severity: req.severity,
            title: req.title,
            body_md: req.body_md,
            platforms: req.platforms,
            roles: req.roles,
            can_close: req.can_close,
            links: req.links.into_iter().map(NotificationLink::from).collect(),
        }
    }
}

/// Response body for `POST /notifications`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationResponse {
    /// Identity assigned to the new notification.
    #[schema(value_type = uuid::Uuid)]
    pub notification_id: NotificationId,
}

/// Full notification representation for list and detail responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    /// Notification identity.
    #[schema(value_type = uuid::Uuid)]
    pub notification_id: NotificationId,
    /// Current lifecycle status.
    #[schema(value_type = String)]
    pub status: NotificationStatus,
    /// Rendering severity.
    #[schema(value_type = String)]
    pub severity: Severity,
    /// Short headline.
    pub title: String,
    /// Markdown body.
    pub body_md: String,
    /// Client surfaces that may display the notification.
    pub platforms: Vec<String>,
    /// User roles the notification is aimed at.
    pub roles: Vec<String>,
    /// Start of the active window.
    pub valid_from: DateTime<Utc>,
    /// End of the active window.
    pub valid_to: DateTime<Utc>,
    /// Whether the end user may dismiss it.
    pub can_close: bool,
    /// Ordered call-to-action links.
    pub links: Vec<LinkDto>,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// Timestamp of the last mutating operation.
    pub last_modified: DateTime<Utc>,
}

impl From<Notification> for NotificationDto {
    fn from(n: Notification) -> Self {
        Self {
            notification_id: n.notification_id,
            status: n.status,
            severity: n.severity,
            title: n.title,
            body_md: n.body_md,
            platforms: n.platforms,
            roles: n.roles,
            valid_from: n.valid_from,
            valid_to: n.valid_to,
            can_close: n.can_close,
            links: n.links.into_iter().map(LinkDto::from).collect(),
            created: n.created,
            last_modified: n.last_modified,
        }
    }
}

/// Query parameters for `GET /notifications`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsQuery {
    /// Exact status match.
    #[param(value_type = Option<String>)]
    pub status: Option<NotificationStatus>,
    /// Inclusive lower bound on `validFrom`.
    pub valid_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `validTo`.
    pub valid_to: Option<DateTime<Utc>>,
    /// Maximum number of results (default 100).
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_QUERY_LIMIT
}

impl From<NotificationsQuery> for NotificationsFilter {
    fn from(query: NotificationsQuery) -> Self {
        Self {
            status: query.status,
            valid_from: query.valid_from,
            valid_to: query.valid_to,
            limit: query.limit,
        }
    }
}
