use crate::dtos::PushSubscriptionDTO;
use planner_domain::PushSubscription;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscriptionResponse {
    pub push_subscription: PushSubscriptionDTO,
}

impl PushSubscriptionResponse {
    pub fn new(subscription: PushSubscription) -> Self {
        Self {
            push_subscription: PushSubscriptionDTO::new(subscription),
        }
    }
}

pub mod set_push_subscription {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Either the output of the browser `PushSubscription.toJSON()` or
        /// any other subscription shape
        pub subscription: serde_json::Value,
    }

    pub type APIResponse = PushSubscriptionResponse;
}

pub mod delete_push_subscription {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deleted: bool,
    }
}

pub mod get_vapid_public_key {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub public_key: String,
    }
}
