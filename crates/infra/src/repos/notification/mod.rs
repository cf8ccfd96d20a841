mod inmemory;
mod postgres;

use super::shared::repo::DeleteResult;
pub use inmemory::InMemoryNotificationRepo;
use planner_domain::{ScheduledNotification, ID};
pub use postgres::PostgresNotificationRepo;

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &ScheduledNotification) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> Option<ScheduledNotification>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<ScheduledNotification>>;
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<ScheduledNotification>>;
    /// Due notifications that are neither sent nor failed, oldest first
    async fn find_pending(&self, now: i64, limit: usize)
        -> anyhow::Result<Vec<ScheduledNotification>>;
    /// Atomically marks up to `limit` due notifications as claimed by a worker
    /// run at `now` and returns them sorted by `send_at`. Notifications
    /// claimed by another run less than `lease_millis` ago are skipped.
    async fn claim_due(
        &self,
        now: i64,
        lease_millis: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ScheduledNotification>>;
    /// Marks the notification sent if it is still held by the claim made at
    /// `claimed_at`. Returns `false` when it was already sent, rescheduled or
    /// does not exist.
    async fn mark_sent(&self, notification_id: &ID, claimed_at: i64) -> anyhow::Result<bool>;
    /// Same claim condition as `mark_sent`
    async fn record_failure(
        &self,
        notification_id: &ID,
        claimed_at: i64,
        error: &str,
        permanent: bool,
        max_attempts: i64,
    ) -> anyhow::Result<()>;
    /// Moves every unsent notification of the event to the new `send_at`
    /// and gives it a fresh set of attempts. Returns the number of rows touched.
    async fn reschedule_unsent_by_event(
        &self,
        event_id: &ID,
        send_at: i64,
        message: &str,
    ) -> anyhow::Result<u64>;
    async fn delete_unsent_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use crate::PlannerContext;
    use planner_domain::{ScheduledNotification, ID};

    fn notification(send_at: i64) -> ScheduledNotification {
        ScheduledNotification::new(
            ID::default(),
            "Lembrete: Dentista em 30 minutos".into(),
            send_at,
            0,
        )
    }

    #[tokio::test]
    async fn claims_due_notifications_in_send_at_order() {
        let ctx = PlannerContext::create_inmemory();
        let repo = &ctx.repos.notifications;
        for send_at in &[300, 100, 200, 5000] {
            repo.insert(&notification(*send_at)).await.unwrap();
        }

        let claimed = repo.claim_due(1000, 60_000, 2).await.unwrap();
        let send_ats = claimed.iter().map(|n| n.send_at).collect::<Vec<_>>();
        assert_eq!(send_ats, vec![100, 200]);
        assert!(claimed.iter().all(|n| n.claimed_at == Some(1000)));

        // A concurrent run within the lease only sees the remaining one
        let claimed = repo.claim_due(1001, 60_000, 10).await.unwrap();
        assert_eq!(claimed.len(), 1);
        assert_eq!(claimed[0].send_at, 300);

        assert!(repo.claim_due(1002, 60_000, 10).await.unwrap().is_empty());
        // After the lease expires abandoned claims are picked up again
        assert_eq!(repo.claim_due(70_000, 60_000, 10).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn sent_notifications_are_never_claimed_again() {
        let ctx = PlannerContext::create_inmemory();
        let repo = &ctx.repos.notifications;
        let n = notification(0);
        repo.insert(&n).await.unwrap();

        assert_eq!(repo.claim_due(10, 0, 10).await.unwrap().len(), 1);
        assert!(repo.mark_sent(&n.id, 10).await.unwrap());
        assert!(!repo.mark_sent(&n.id, 10).await.unwrap());
        assert!(repo.claim_due(100_000, 0, 10).await.unwrap().is_empty());
        assert!(repo.find_pending(100_000, 10).await.unwrap().is_empty());

        let n = repo.find(&n.id).await.unwrap();
        assert!(n.sent);
        assert!(n.claimed_at.is_none());
    }

    #[tokio::test]
    async fn failures_are_recorded_until_max_attempts() {
        let ctx = PlannerContext::create_inmemory();
        let repo = &ctx.repos.notifications;
        let n = notification(0);
        repo.insert(&n).await.unwrap();

        assert_eq!(repo.claim_due(10, 0, 10).await.unwrap().len(), 1);
        repo.record_failure(&n.id, 10, "status_500", false, 2).await.unwrap();
        let stored = repo.find(&n.id).await.unwrap();
        assert_eq!(stored.attempts, 1);
        assert!(!stored.failed);
        assert_eq!(repo.find_pending(10, 10).await.unwrap().len(), 1);

        assert_eq!(repo.claim_due(20, 0, 10).await.unwrap().len(), 1);
        repo.record_failure(&n.id, 20, "timeout", false, 2).await.unwrap();
        let stored = repo.find(&n.id).await.unwrap();
        assert_eq!(stored.attempts, 2);
        assert!(stored.failed);
        assert_eq!(stored.last_error.as_deref(), Some("timeout"));
        assert!(repo.find_pending(10, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stale_claims_cannot_settle_rescheduled_notifications() {
        let ctx = PlannerContext::create_inmemory();
        let repo = &ctx.repos.notifications;
        let event_id = ID::default();
        let mut n = notification(0);
        n.event_id = Some(event_id.clone());
        repo.insert(&n).await.unwrap();

        assert_eq!(repo.claim_due(10, 60_000, 10).await.unwrap().len(), 1);
        // The entry is edited while the worker is still delivering
        repo.reschedule_unsent_by_event(&event_id, 5000, "Lembrete: Nova hora")
            .await
            .unwrap();

        assert!(!repo.mark_sent(&n.id, 10).await.unwrap());
        repo.record_failure(&n.id, 10, "timeout", true, 5).await.unwrap();
        let stored = repo.find(&n.id).await.unwrap();
        assert!(!stored.sent);
        assert!(!stored.failed);
        assert_eq!(stored.attempts, 0);
        assert_eq!(stored.send_at, 5000);

        // A claim made by a later run settles it normally
        let claimed = repo.claim_due(6000, 60_000, 10).await.unwrap();
        assert_eq!(claimed.len(), 1);
        assert!(!repo.mark_sent(&n.id, 10).await.unwrap());
        assert!(repo.mark_sent(&n.id, 6000).await.unwrap());
    }

    #[tokio::test]
    async fn reschedules_and_deletes_unsent_by_event() {
        let ctx = PlannerContext::create_inmemory();
        let repo = &ctx.repos.notifications;
        let event_id = ID::default();
        let mut unsent = notification(100);
        unsent.event_id = Some(event_id.clone());
        let mut sent = notification(50);
        sent.event_id = Some(event_id.clone());
        sent.sent = true;
        repo.insert(&unsent).await.unwrap();
        repo.insert(&sent).await.unwrap();
        repo.insert(&notification(100)).await.unwrap();

        let updated = repo
            .reschedule_unsent_by_event(&event_id, 900, "Lembrete: Reunião em 30 minutos")
            .await
            .unwrap();
        assert_eq!(updated, 1);
        let stored = repo.find(&unsent.id).await.unwrap();
        assert_eq!(stored.send_at, 900);
        assert_eq!(stored.message, "Lembrete: Reunião em 30 minutos");
        assert_eq!(repo.find(&sent.id).await.unwrap().send_at, 50);

        let res = repo.delete_unsent_by_event(&event_id).await.unwrap();
        assert_eq!(res.deleted_count, 1);
        assert!(repo.find(&unsent.id).await.is_none());
        let remaining = repo.find_by_event(&event_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, sent.id);
    }
}
