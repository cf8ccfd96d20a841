use super::IPushSubscriptionRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use planner_domain::{PushSubscription, ID};

pub struct InMemoryPushSubscriptionRepo {
    subscriptions: std::sync::Mutex<Vec<PushSubscription>>,
}

impl InMemoryPushSubscriptionRepo {
    pub fn new() -> Self {
        Self {
            subscriptions: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPushSubscriptionRepo for InMemoryPushSubscriptionRepo {
    async fn upsert(&self, subscription: &PushSubscription) -> anyhow::Result<()> {
        let mut subscriptions = lock(&self.subscriptions);
        match subscriptions
            .iter_mut()
            .find(|s| s.user_id == subscription.user_id)
        {
            Some(existing) => {
                existing.subscription = subscription.subscription.clone();
                existing.updated = subscription.updated;
            }
            None => subscriptions.push(subscription.clone()),
        }
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Option<PushSubscription> {
        find(user_id, &self.subscriptions)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.subscriptions, |s| s.user_id == *user_id))
    }
}
