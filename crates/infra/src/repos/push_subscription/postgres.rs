use super::IPushSubscriptionRepo;
use crate::repos::shared::repo::DeleteResult;
use planner_domain::{PushSubscription, Subscription, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresPushSubscriptionRepo {
    pool: PgPool,
}

impl PostgresPushSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PushSubscriptionRaw {
    user_uid: Uuid,
    subscription: Json<Subscription>,
    created: i64,
    updated: i64,
}

impl From<PushSubscriptionRaw> for PushSubscription {
    fn from(raw: PushSubscriptionRaw) -> Self {
        Self {
            user_id: raw.user_uid.into(),
            subscription: raw.subscription.0,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IPushSubscriptionRepo for PostgresPushSubscriptionRepo {
    async fn upsert(&self, subscription: &PushSubscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO push_subscriptions
            (user_uid, subscription, created, updated)
            VALUES($1, $2, $3, $4)
            ON CONFLICT (user_uid) DO UPDATE
            SET subscription = EXCLUDED.subscription,
                updated = EXCLUDED.updated
            "#,
        )
        .bind(subscription.user_id.inner_ref())
        .bind(Json(&subscription.subscription))
        .bind(subscription.created)
        .bind(subscription.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Option<PushSubscription> {
        sqlx::query_as::<_, PushSubscriptionRaw>(
            r#"
            SELECT * FROM push_subscriptions
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| error!("Unable to find push subscription of user {}: {:?}", user_id, e))
        .ok()?
        .map(|raw| raw.into())
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM push_subscriptions
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
