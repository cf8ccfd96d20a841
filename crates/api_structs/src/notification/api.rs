use crate::dtos::{DeliveryReportDTO, ScheduledNotificationDTO};
use planner_domain::{DeliveryReport, ScheduledNotification, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct NotificationResponse {
    pub ok: bool,
    pub notification: ScheduledNotificationDTO,
}

impl NotificationResponse {
    pub fn new(notification: ScheduledNotification) -> Self {
        Self {
            ok: true,
            notification: ScheduledNotificationDTO::new(notification),
        }
    }
}

/// Body shared by the routes that schedule a notification. Every field is
/// optional here so that missing fields produce a helpful error message.
#[derive(Serialize, Deserialize, Default, Debug)]
pub struct ScheduleNotificationBody {
    pub user_id: Option<ID>,
    /// Any subscription shape, tagged or not
    pub subscription: Option<serde_json::Value>,
    pub message: Option<String>,
    /// RFC 3339
    pub send_at: Option<String>,
}

pub mod create_notification {
    use super::*;

    pub type RequestBody = ScheduleNotificationBody;
    pub type APIResponse = NotificationResponse;
}

pub mod subscribe_webhook {
    use super::*;

    pub type RequestBody = ScheduleNotificationBody;
    pub type APIResponse = NotificationResponse;
}

pub mod get_pending_notifications {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub ok: bool,
        pub pending: Vec<ScheduledNotificationDTO>,
    }

    impl APIResponse {
        pub fn new(pending: Vec<ScheduledNotification>) -> Self {
            Self {
                ok: true,
                pending: pending
                    .into_iter()
                    .map(ScheduledNotificationDTO::new)
                    .collect(),
            }
        }
    }
}

pub mod send_pending_notifications {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub ok: bool,
        pub results: Vec<DeliveryReportDTO>,
    }

    impl APIResponse {
        pub fn new(reports: Vec<DeliveryReport>) -> Self {
            Self {
                ok: true,
                results: reports
                    .into_iter()
                    .map(|r| DeliveryReportDTO {
                        id: r.id,
                        ok: r.ok,
                        status: r.status,
                        error: r.error,
                    })
                    .collect(),
            }
        }
    }
}

pub mod get_my_notifications {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub notifications: Vec<ScheduledNotificationDTO>,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<ScheduledNotification>) -> Self {
            Self {
                notifications: notifications
                    .into_iter()
                    .map(ScheduledNotificationDTO::new)
                    .collect(),
            }
        }
    }
}
