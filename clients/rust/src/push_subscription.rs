use crate::{APIResponse, BaseClient};
use planner_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct PushSubscriptionClient {
    base: Arc<BaseClient>,
}

impl PushSubscriptionClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn set(
        &self,
        subscription: serde_json::Value,
    ) -> APIResponse<set_push_subscription::APIResponse> {
        let body = set_push_subscription::RequestBody { subscription };
        self.base
            .put(body, "push-subscription".into(), StatusCode::OK)
            .await
    }

    pub async fn delete(&self) -> APIResponse<delete_push_subscription::APIResponse> {
        self.base
            .delete("push-subscription".into(), StatusCode::OK)
            .await
    }

    pub async fn vapid_public_key(&self) -> APIResponse<get_vapid_public_key::APIResponse> {
        self.base
            .get("push-subscription/vapid-key".into(), StatusCode::OK)
            .await
    }
}
