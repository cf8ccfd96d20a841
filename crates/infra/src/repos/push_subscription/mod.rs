mod inmemory;
mod postgres;

use super::shared::repo::DeleteResult;
pub use inmemory::InMemoryPushSubscriptionRepo;
use planner_domain::{PushSubscription, ID};
pub use postgres::PostgresPushSubscriptionRepo;

#[async_trait::async_trait]
pub trait IPushSubscriptionRepo: Send + Sync {
    /// Inserts the subscription or replaces the one the user already has
    async fn upsert(&self, subscription: &PushSubscription) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: &ID) -> Option<PushSubscription>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use crate::PlannerContext;
    use planner_domain::{PushSubscription, Subscription, WebhookSubscription, ID};

    fn webhook(url: &str) -> Subscription {
        Subscription::Webhook(WebhookSubscription {
            url: url.into(),
            headers: Default::default(),
        })
    }

    #[tokio::test]
    async fn keeps_one_subscription_per_user() {
        let ctx = PlannerContext::create_inmemory();
        let repo = &ctx.repos.push_subscriptions;
        let user_id = ID::default();
        let mut sub = PushSubscription {
            user_id: user_id.clone(),
            subscription: webhook("https://hooks.example.com/a"),
            created: 0,
            updated: 0,
        };
        repo.upsert(&sub).await.unwrap();

        sub.subscription = webhook("https://hooks.example.com/b");
        sub.updated = 10;
        repo.upsert(&sub).await.unwrap();
        assert_eq!(repo.find_by_user(&user_id).await, Some(sub));
        assert!(repo.find_by_user(&ID::default()).await.is_none());

        assert_eq!(repo.delete_by_user(&user_id).await.unwrap().deleted_count, 1);
        assert!(repo.find_by_user(&user_id).await.is_none());
        assert_eq!(repo.delete_by_user(&user_id).await.unwrap().deleted_count, 0);
    }
}
