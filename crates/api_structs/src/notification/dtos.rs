use planner_domain::{format_timestamp, ScheduledNotification, Subscription, ID};
use serde::{Deserialize, Serialize};

/// Field names follow the snake case contract of the notification routes
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScheduledNotificationDTO {
    pub id: ID,
    pub user_id: ID,
    pub event_id: Option<ID>,
    pub message: String,
    /// RFC 3339
    pub send_at: String,
    pub sent: bool,
    pub failed: bool,
    pub subscription: Option<Subscription>,
    pub attempts: i64,
    pub last_error: Option<String>,
}

impl ScheduledNotificationDTO {
    pub fn new(notification: ScheduledNotification) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            event_id: notification.event_id,
            message: notification.message,
            send_at: format_timestamp(notification.send_at),
            sent: notification.sent,
            failed: notification.failed,
            subscription: notification.subscription,
            attempts: notification.attempts,
            last_error: notification.last_error,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DeliveryReportDTO {
    pub id: ID,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
