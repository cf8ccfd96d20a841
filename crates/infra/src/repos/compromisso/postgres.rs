use super::ICompromissoRepo;
use chrono::{NaiveDate, NaiveTime};
use planner_domain::{Compromisso, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresCompromissoRepo {
    pool: PgPool,
}

impl PostgresCompromissoRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CompromissoRaw {
    compromisso_uid: Uuid,
    user_uid: Uuid,
    date: NaiveDate,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    title: String,
    description: String,
    created: i64,
    updated: i64,
}

impl From<CompromissoRaw> for Compromisso {
    fn from(raw: CompromissoRaw) -> Self {
        Self {
            id: raw.compromisso_uid.into(),
            user_id: raw.user_uid.into(),
            date: raw.date,
            start_time: raw.start_time,
            end_time: raw.end_time,
            title: raw.title,
            description: raw.description,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl ICompromissoRepo for PostgresCompromissoRepo {
    async fn insert(&self, compromisso: &Compromisso) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO compromissos
            (compromisso_uid, user_uid, date, start_time, end_time, title, description, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(compromisso.id.inner_ref())
        .bind(compromisso.user_id.inner_ref())
        .bind(compromisso.date)
        .bind(compromisso.start_time)
        .bind(compromisso.end_time)
        .bind(&compromisso.title)
        .bind(&compromisso.description)
        .bind(compromisso.created)
        .bind(compromisso.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, compromisso: &Compromisso) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE compromissos
            SET date = $2,
                start_time = $3,
                end_time = $4,
                title = $5,
                description = $6,
                updated = $7
            WHERE compromisso_uid = $1
            "#,
        )
        .bind(compromisso.id.inner_ref())
        .bind(compromisso.date)
        .bind(compromisso.start_time)
        .bind(compromisso.end_time)
        .bind(&compromisso.title)
        .bind(&compromisso.description)
        .bind(compromisso.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, compromisso_id: &ID) -> Option<Compromisso> {
        sqlx::query_as::<_, CompromissoRaw>(
            r#"
            SELECT * FROM compromissos
            WHERE compromisso_uid = $1
            "#,
        )
        .bind(compromisso_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| error!("Unable to find compromisso {}: {:?}", compromisso_id, e))
        .ok()?
        .map(|raw| raw.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Compromisso>> {
        let compromissos = sqlx::query_as::<_, CompromissoRaw>(
            r#"
            SELECT * FROM compromissos
            WHERE user_uid = $1
            ORDER BY date ASC, start_time ASC NULLS FIRST
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(compromissos.into_iter().map(|raw| raw.into()).collect())
    }

    async fn find_by_user_between(
        &self,
        user_id: &ID,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<Compromisso>> {
        let compromissos = sqlx::query_as::<_, CompromissoRaw>(
            r#"
            SELECT * FROM compromissos
            WHERE user_uid = $1 AND date >= $2 AND date <= $3
            ORDER BY date ASC, start_time ASC NULLS FIRST
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(compromissos.into_iter().map(|raw| raw.into()).collect())
    }

    async fn delete(&self, compromisso_id: &ID) -> Option<Compromisso> {
        sqlx::query_as::<_, CompromissoRaw>(
            r#"
            DELETE FROM compromissos
            WHERE compromisso_uid = $1
            RETURNING *
            "#,
        )
        .bind(compromisso_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| error!("Unable to delete compromisso {}: {:?}", compromisso_id, e))
        .ok()?
        .map(|raw| raw.into())
    }
}
