//! Domain layer: the notification entity and its lifecycle rules.
//!
//! This module contains the pure data/state model: notification identity
//! (with pluggable generation), the entity itself, and the transition rules
//! of the `Draft → Published → Unpublished` state machine. No I/O happens
//! here — persistence lives in [`crate::store`].

pub mod id;
pub mod notification;

pub use id::{IdGenerator, NotificationId, UuidIdGenerator};
pub use notification::{
    NewNotification, Notification, NotificationLink, NotificationStatus, Severity,
};
