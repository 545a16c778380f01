//! Notification lifecycle handlers: create, list, publish, unpublish, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateNotificationRequest, CreateNotificationResponse, NotificationDto, NotificationsQuery,
};
use crate::api::validation;
use crate::app_state::AppState;
use crate::domain::NotificationId;
use crate::error::{ErrorResponse, ServiceError};

/// `POST /notifications` — Create a new Draft notification.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidRequest`] when the body fails validation.
#[utoipa::path(
    post,
    path = "/api/v1/notifications",
    tag = "Notifications",
    summary = "Create a notification",
    description = "Creates a new notification in Draft status and returns its assigned identity. Omitted `validFrom` defaults to creation time; omitted `validTo` to a far-future sentinel.",
    request_body = CreateNotificationRequest,
    responses(
        (status = 200, description = "Notification created", body = CreateNotificationResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
    )
)]
pub async fn create_notification(
    State(state): State<AppState>,
    Json(req): Json<CreateNotificationRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validation::validate_create(&req)?;
    let id = state.store.create(req.into()).await?;
    Ok(Json(CreateNotificationResponse {
        notification_id: id,
    }))
}

/// `GET /notifications` — List notifications with optional filters.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidRequest`] on an inverted filter window.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    tag = "Notifications",
    summary = "List notifications",
    description = "Returns notifications matching the filters, sorted by validFrom descending. The timestamp filters are absolute bounds (validFrom >= / validTo <=), not an activity window.",
    params(NotificationsQuery),
    responses(
        (status = 200, description = "Matching notifications", body = Vec<NotificationDto>),
        (status = 400, description = "Invalid filter combination", body = ErrorResponse),
    )
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationsQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    validation::validate_query(&query)?;
    let notifications = state.store.notifications(query.into()).await?;
    let dtos: Vec<NotificationDto> = notifications.into_iter().map(NotificationDto::from).collect();
    Ok(Json(dtos))
}

/// `GET /notifications/:id` — Get a single notification.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] if no such notification exists.
#[utoipa::path(
    get,
    path = "/api/v1/notifications/{id}",
    tag = "Notifications",
    summary = "Get notification details",
    params(
        ("id" = uuid::Uuid, Path, description = "Notification UUID"),
    ),
    responses(
        (status = 200, description = "Notification details", body = NotificationDto),
        (status = 404, description = "Notification not found", body = ErrorResponse),
    )
)]
pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let notification = state.store.get(NotificationId::from_uuid(id)).await?;
    Ok(Json(NotificationDto::from(notification)))
}

/// `POST /notifications/:id/publish` — Publish a notification.
///
/// Publishing has no status precondition beyond existence; re-publishing is
/// allowed.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] if no such notification exists.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/publish",
    tag = "Notifications",
    summary = "Publish a notification",
    params(
        ("id" = uuid::Uuid, Path, description = "Notification UUID"),
    ),
    responses(
        (status = 204, description = "Notification published"),
        (status = 404, description = "Notification not found", body = ErrorResponse),
    )
)]
pub async fn publish_notification(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.store.publish(NotificationId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /notifications/:id/unpublish` — Withdraw a published notification.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] if no such notification exists, or
/// [`ServiceError::InvalidStatus`] if it is not currently Published.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/unpublish",
    tag = "Notifications",
    summary = "Unpublish a notification",
    params(
        ("id" = uuid::Uuid, Path, description = "Notification UUID"),
    ),
    responses(
        (status = 204, description = "Notification unpublished"),
        (status = 400, description = "Notification is not Published", body = ErrorResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse),
    )
)]
pub async fn unpublish_notification(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.store.unpublish(NotificationId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /notifications/:id` — Permanently remove a Draft notification.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] if no such notification exists, or
/// [`ServiceError::InvalidStatus`] if it is not currently Draft.
#[utoipa::path(
    delete,
    path = "/api/v1/notifications/{id}",
    tag = "Notifications",
    summary = "Delete a draft notification",
    params(
        ("id" = uuid::Uuid, Path, description = "Notification UUID"),
    ),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 400, description = "Notification is not Draft", body = ErrorResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse),
    )
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.store.delete(NotificationId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /notifications/active/:platform` — Notifications currently visible
/// on a platform.
///
/// # Errors
///
/// Returns [`ServiceError::Persistence`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/notifications/active/{platform}",
    tag = "Notifications",
    summary = "List active notifications for a platform",
    description = "Returns Published notifications scoped to the platform whose active window strictly contains the current time.",
    params(
        ("platform" = String, Path, description = "Platform tag, e.g. `geoit`"),
    ),
    responses(
        (status = 200, description = "Active notifications", body = Vec<NotificationDto>),
    )
)]
pub async fn active_notifications(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let notifications = state.store.active_notifications(&platform).await?;
    let dtos: Vec<NotificationDto> = notifications.into_iter().map(NotificationDto::from).collect();
    Ok(Json(dtos))
}

/// Notification lifecycle routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            post(create_notification).get(list_notifications),
        )
        .route(
            "/notifications/{id}",
            get(get_notification).delete(delete_notification),
        )
        .route("/notifications/{id}/publish", post(publish_notification))
        .route(
            "/notifications/{id}/unpublish",
            post(unpublish_notification),
        )
        .route(
            "/notifications/active/{platform}",
            get(active_notifications),
        )
}
