use super::INotificationRepo;
use crate::repos::shared::repo::DeleteResult;
use planner_domain::{ScheduledNotification, Subscription, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduledNotificationRaw {
    notification_uid: Uuid,
    user_uid: Uuid,
    event_uid: Option<Uuid>,
    message: String,
    send_at: i64,
    sent: bool,
    failed: bool,
    subscription: Option<Json<Subscription>>,
    attempts: i64,
    last_error: Option<String>,
    claimed_at: Option<i64>,
    created: i64,
}

impl From<ScheduledNotificationRaw> for ScheduledNotification {
    fn from(raw: ScheduledNotificationRaw) -> Self {
        Self {
            id: raw.notification_uid.into(),
            user_id: raw.user_uid.into(),
            event_id: raw.event_uid.map(|id| id.into()),
            message: raw.message,
            send_at: raw.send_at,
            sent: raw.sent,
            failed: raw.failed,
            subscription: raw.subscription.map(|s| s.0),
            attempts: raw.attempts,
            last_error: raw.last_error,
            claimed_at: raw.claimed_at,
            created: raw.created,
        }
    }
}

fn into_notifications(raws: Vec<ScheduledNotificationRaw>) -> Vec<ScheduledNotification> {
    raws.into_iter().map(|raw| raw.into()).collect()
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &ScheduledNotification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO scheduled_notifications
            (notification_uid, user_uid, event_uid, message, send_at, sent, failed,
             subscription, attempts, last_error, claimed_at, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(notification.event_id.as_ref().map(|id| *id.inner_ref()))
        .bind(&notification.message)
        .bind(notification.send_at)
        .bind(notification.sent)
        .bind(notification.failed)
        .bind(notification.subscription.as_ref().map(Json))
        .bind(notification.attempts)
        .bind(&notification.last_error)
        .bind(notification.claimed_at)
        .bind(notification.created)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<ScheduledNotification> {
        sqlx::query_as::<_, ScheduledNotificationRaw>(
            r#"
            SELECT * FROM scheduled_notifications
            WHERE notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| error!("Unable to find notification {}: {:?}", notification_id, e))
        .ok()?
        .map(|raw| raw.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<ScheduledNotification>> {
        let raws = sqlx::query_as::<_, ScheduledNotificationRaw>(
            r#"
            SELECT * FROM scheduled_notifications
            WHERE user_uid = $1
            ORDER BY send_at ASC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(into_notifications(raws))
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<ScheduledNotification>> {
        let raws = sqlx::query_as::<_, ScheduledNotificationRaw>(
            r#"
            SELECT * FROM scheduled_notifications
            WHERE event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(into_notifications(raws))
    }

    async fn find_pending(
        &self,
        now: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ScheduledNotification>> {
        let raws = sqlx::query_as::<_, ScheduledNotificationRaw>(
            r#"
            SELECT * FROM scheduled_notifications
            WHERE sent = false AND failed = false AND send_at <= $1
            ORDER BY send_at ASC
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(into_notifications(raws))
    }

    async fn claim_due(
        &self,
        now: i64,
        lease_millis: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ScheduledNotification>> {
        let raws = sqlx::query_as::<_, ScheduledNotificationRaw>(
            r#"
            WITH due AS (
                SELECT notification_uid FROM scheduled_notifications
                WHERE sent = false
                    AND failed = false
                    AND send_at <= $1
                    AND (claimed_at IS NULL OR claimed_at <= $2)
                ORDER BY send_at ASC
                LIMIT $3
                FOR UPDATE SKIP LOCKED
            )
            UPDATE scheduled_notifications AS n
            SET claimed_at = $1
            FROM due
            WHERE n.notification_uid = due.notification_uid
            RETURNING n.*
            "#,
        )
        .bind(now)
        .bind(now - lease_millis)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        // RETURNING does not preserve the order of the CTE
        let mut claimed = into_notifications(raws);
        claimed.sort_by_key(|n| n.send_at);
        Ok(claimed)
    }

    async fn mark_sent(&self, notification_id: &ID, claimed_at: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE scheduled_notifications
            SET sent = true, claimed_at = NULL
            WHERE notification_uid = $1 AND sent = false AND claimed_at = $2
            "#,
        )
        .bind(notification_id.inner_ref())
        .bind(claimed_at)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    async fn record_failure(
        &self,
        notification_id: &ID,
        claimed_at: i64,
        error: &str,
        permanent: bool,
        max_attempts: i64,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE scheduled_notifications
            SET attempts = attempts + 1,
                last_error = $2,
                claimed_at = NULL,
                failed = failed OR $3 OR attempts + 1 >= $4
            WHERE notification_uid = $1 AND sent = false AND claimed_at = $5
            "#,
        )
        .bind(notification_id.inner_ref())
        .bind(error)
        .bind(permanent)
        .bind(max_attempts)
        .bind(claimed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn reschedule_unsent_by_event(
        &self,
        event_id: &ID,
        send_at: i64,
        message: &str,
    ) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE scheduled_notifications
            SET send_at = $2,
                message = $3,
                attempts = 0,
                failed = false,
                last_error = NULL,
                claimed_at = NULL
            WHERE event_uid = $1 AND sent = false
            "#,
        )
        .bind(event_id.inner_ref())
        .bind(send_at)
        .bind(message)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }

    async fn delete_unsent_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM scheduled_notifications
            WHERE event_uid = $1 AND sent = false
            "#,
        )
        .bind(event_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
