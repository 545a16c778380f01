//! Request validation applied before the store is invoked.
//!
//! The store accepts already-validated inputs, so these checks are the only
//! place well-formedness is enforced: non-empty text fields, a sane active
//! window, and absolute link URLs. Failures surface as
//! [`ServiceError::InvalidRequest`] (400).

use chrono::Utc;

use crate::api::dto::{CreateNotificationRequest, NotificationsQuery};
use crate::error::ServiceError;

/// Maximum length of a link label.
const MAX_LINK_LABEL_LEN: usize = 100;

/// Validates a create request.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidRequest`] naming the first failing rule.
pub fn validate_create(req: &CreateNotificationRequest) -> Result<(), ServiceError> {
    if req.title.trim().is_empty() {
        return Err(invalid("title must not be empty"));
    }
    if req.body_md.trim().is_empty() {
        return Err(invalid("bodyMd must not be empty"));
    }
    if req.platforms.is_empty() {
        return Err(invalid("platforms must not be empty"));
    }
    if req.roles.is_empty() {
        return Err(invalid("roles must not be empty"));
    }

    if let Some(valid_to) = req.valid_to {
        if valid_to <= Utc::now() {
            return Err(invalid("validTo must be in the future"));
        }
        if let Some(valid_from) = req.valid_from
            && valid_from > valid_to
        {
            return Err(invalid("validFrom must not be after validTo"));
        }
    }

    for link in &req.links {
        if link.label.trim().is_empty() {
            return Err(invalid("link label must not be empty"));
        }
        if link.label.chars().count() > MAX_LINK_LABEL_LEN {
            return Err(invalid("link label must be at most 100 characters"));
        }
        if !is_absolute_http_url(&link.url) {
            return Err(invalid("link url must be an absolute http(s) URL"));
        }
    }

    Ok(())
}

/// Validates the listing filter: when both bounds are given, `validTo` must
/// lie after `validFrom`.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidRequest`] on an inverted window.
pub fn validate_query(query: &NotificationsQuery) -> Result<(), ServiceError> {
    if let (Some(from), Some(to)) = (query.valid_from, query.valid_to)
        && to <= from
    {
        return Err(invalid("validTo must be after validFrom"));
    }
    Ok(())
}

fn invalid(message: &str) -> ServiceError {
    ServiceError::InvalidRequest(message.to_string())
}

fn is_absolute_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty())
}
