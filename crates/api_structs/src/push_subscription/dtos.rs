use planner_domain::{PushSubscription, Subscription};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscriptionDTO {
    pub subscription: Subscription,
    pub created: i64,
    pub updated: i64,
}

impl PushSubscriptionDTO {
    pub fn new(subscription: PushSubscription) -> Self {
        Self {
            subscription: subscription.subscription,
            created: subscription.created,
            updated: subscription.updated,
        }
    }
}
