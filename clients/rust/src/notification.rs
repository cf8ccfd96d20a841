use crate::{APIResponse, BaseClient};
use planner_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

pub type ScheduleNotificationInput = ScheduleNotificationBody;

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Schedules a notification for any kind of subscription. Requires the
    /// service role key.
    pub async fn create(
        &self,
        input: ScheduleNotificationInput,
    ) -> APIResponse<create_notification::APIResponse> {
        self.base
            .post(input, "notifications/create".into(), StatusCode::OK)
            .await
    }

    /// Schedules a notification delivered to a webhook. Requires the
    /// service role key.
    pub async fn subscribe(
        &self,
        input: ScheduleNotificationInput,
    ) -> APIResponse<subscribe_webhook::APIResponse> {
        self.base
            .post(input, "notifications/subscribe".into(), StatusCode::OK)
            .await
    }

    pub async fn pending(&self) -> APIResponse<get_pending_notifications::APIResponse> {
        self.base
            .get("notifications/pending".into(), StatusCode::OK)
            .await
    }

    /// Runs the notification worker once
    pub async fn send_pending(&self) -> APIResponse<send_pending_notifications::APIResponse> {
        self.base
            .post(
                serde_json::json!({}),
                "notifications/send-pending".into(),
                StatusCode::OK,
            )
            .await
    }

    /// Notifications of the authenticated user
    pub async fn mine(&self) -> APIResponse<get_my_notifications::APIResponse> {
        self.base.get("notifications".into(), StatusCode::OK).await
    }
}
