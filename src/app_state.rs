//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::store::NotificationStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Notification store owning all lifecycle logic.
    pub store: Arc<dyn NotificationStore>,
}
