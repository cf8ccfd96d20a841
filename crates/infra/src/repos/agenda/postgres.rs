use super::IAgendaRepo;
use chrono::{NaiveDate, NaiveTime};
use planner_domain::{Agenda, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresAgendaRepo {
    pool: PgPool,
}

impl PostgresAgendaRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AgendaRaw {
    agenda_uid: Uuid,
    user_uid: Uuid,
    date: NaiveDate,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    title: String,
    description: String,
    instagram: String,
    link: String,
    cupom: String,
    anexo: Json<Vec<String>>,
    created: i64,
    updated: i64,
}

impl From<AgendaRaw> for Agenda {
    fn from(raw: AgendaRaw) -> Self {
        Self {
            id: raw.agenda_uid.into(),
            user_id: raw.user_uid.into(),
            date: raw.date,
            start_time: raw.start_time,
            end_time: raw.end_time,
            title: raw.title,
            description: raw.description,
            instagram: raw.instagram,
            link: raw.link,
            cupom: raw.cupom,
            anexo: raw.anexo.0,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IAgendaRepo for PostgresAgendaRepo {
    async fn insert(&self, agenda: &Agenda) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO agendas
            (agenda_uid, user_uid, date, start_time, end_time, title, description,
             instagram, link, cupom, anexo, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(agenda.id.inner_ref())
        .bind(agenda.user_id.inner_ref())
        .bind(agenda.date)
        .bind(agenda.start_time)
        .bind(agenda.end_time)
        .bind(&agenda.title)
        .bind(&agenda.description)
        .bind(&agenda.instagram)
        .bind(&agenda.link)
        .bind(&agenda.cupom)
        .bind(Json(&agenda.anexo))
        .bind(agenda.created)
        .bind(agenda.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, agenda: &Agenda) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE agendas
            SET date = $2,
                start_time = $3,
                end_time = $4,
                title = $5,
                description = $6,
                instagram = $7,
                link = $8,
                cupom = $9,
                anexo = $10,
                updated = $11
            WHERE agenda_uid = $1
            "#,
        )
        .bind(agenda.id.inner_ref())
        .bind(agenda.date)
        .bind(agenda.start_time)
        .bind(agenda.end_time)
        .bind(&agenda.title)
        .bind(&agenda.description)
        .bind(&agenda.instagram)
        .bind(&agenda.link)
        .bind(&agenda.cupom)
        .bind(Json(&agenda.anexo))
        .bind(agenda.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, agenda_id: &ID) -> Option<Agenda> {
        sqlx::query_as::<_, AgendaRaw>(
            r#"
            SELECT * FROM agendas
            WHERE agenda_uid = $1
            "#,
        )
        .bind(agenda_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| error!("Unable to find agenda {}: {:?}", agenda_id, e))
        .ok()?
        .map(|raw| raw.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Agenda>> {
        let agendas = sqlx::query_as::<_, AgendaRaw>(
            r#"
            SELECT * FROM agendas
            WHERE user_uid = $1
            ORDER BY date ASC, start_time ASC NULLS FIRST
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(agendas.into_iter().map(|raw| raw.into()).collect())
    }

    async fn find_by_user_between(
        &self,
        user_id: &ID,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<Agenda>> {
        let agendas = sqlx::query_as::<_, AgendaRaw>(
            r#"
            SELECT * FROM agendas
            WHERE user_uid = $1 AND date >= $2 AND date <= $3
            ORDER BY date ASC, start_time ASC NULLS FIRST
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(agendas.into_iter().map(|raw| raw.into()).collect())
    }

    async fn delete(&self, agenda_id: &ID) -> Option<Agenda> {
        sqlx::query_as::<_, AgendaRaw>(
            r#"
            DELETE FROM agendas
            WHERE agenda_uid = $1
            RETURNING *
            "#,
        )
        .bind(agenda_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| error!("Unable to delete agenda {}: {:?}", agenda_id, e))
        .ok()?
        .map(|raw| raw.into())
    }
}
