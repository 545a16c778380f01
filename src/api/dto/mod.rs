//! Request/response DTOs for the notification endpoints.

pub mod notification_dto;

pub use notification_dto::{
    CreateNotificationRequest, CreateNotificationResponse, LinkDto, NotificationDto,
    NotificationsQuery,
};
