use super::INotificationRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use planner_domain::{ScheduledNotification, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<ScheduledNotification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &ScheduledNotification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<ScheduledNotification> {
        find(notification_id, &self.notifications)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<ScheduledNotification>> {
        let mut notifications = find_by(&self.notifications, |n| n.user_id == *user_id);
        notifications.sort_by_key(|n| n.send_at);
        Ok(notifications)
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<ScheduledNotification>> {
        Ok(find_by(&self.notifications, |n| {
            n.event_id.as_ref() == Some(event_id)
        }))
    }

    async fn find_pending(
        &self,
        now: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ScheduledNotification>> {
        let mut pending = find_by(&self.notifications, |n| n.is_pending(now));
        pending.sort_by_key(|n| n.send_at);
        pending.truncate(limit);
        Ok(pending)
    }

    async fn claim_due(
        &self,
        now: i64,
        lease_millis: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ScheduledNotification>> {
        // Selecting and claiming happens under a single lock
        let mut notifications = lock(&self.notifications);
        let mut due = notifications
            .iter_mut()
            .filter(|n| n.is_claimable(now, lease_millis))
            .collect::<Vec<_>>();
        due.sort_by_key(|n| n.send_at);
        let claimed = due
            .into_iter()
            .take(limit)
            .map(|n| {
                n.claimed_at = Some(now);
                n.clone()
            })
            .collect();
        Ok(claimed)
    }

    async fn mark_sent(&self, notification_id: &ID, claimed_at: i64) -> anyhow::Result<bool> {
        let mut marked = false;
        update_many(
            &self.notifications,
            |n| n.id == *notification_id && n.claimed_at == Some(claimed_at),
            |n| marked = n.mark_sent(),
        );
        Ok(marked)
    }

    async fn record_failure(
        &self,
        notification_id: &ID,
        claimed_at: i64,
        error: &str,
        permanent: bool,
        max_attempts: i64,
    ) -> anyhow::Result<()> {
        update_many(
            &self.notifications,
            |n| n.id == *notification_id && !n.sent && n.claimed_at == Some(claimed_at),
            |n| n.record_failure(error.to_string(), permanent, max_attempts),
        );
        Ok(())
    }

    async fn reschedule_unsent_by_event(
        &self,
        event_id: &ID,
        send_at: i64,
        message: &str,
    ) -> anyhow::Result<u64> {
        let updated = update_many(
            &self.notifications,
            |n| n.event_id.as_ref() == Some(event_id) && !n.sent,
            |n| {
                n.send_at = send_at;
                n.message = message.to_string();
                n.attempts = 0;
                n.failed = false;
                n.last_error = None;
                n.claimed_at = None;
            },
        );
        Ok(updated.len() as u64)
    }

    async fn delete_unsent_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.notifications, |n| {
            n.event_id.as_ref() == Some(event_id) && !n.sent
        }))
    }
}
