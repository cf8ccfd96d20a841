use crate::error::PlannerError;
use crate::notification::subscribers::SyncNotificationsOnCompromissoUpdated;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::update_compromisso::*;
use planner_domain::{
    local_date, parse_date, parse_optional_time, Compromisso, InvalidDateError, ID,
};
use planner_infra::PlannerContext;

pub async fn update_compromisso_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateCompromissoUseCase {
        user_id: user.id,
        compromisso_id: path_params.into_inner().compromisso_id,
        date: body.date,
        start_time: body.start_time,
        end_time: body.end_time,
        title: body.title,
        description: body.description,
    };

    execute(usecase, &ctx)
        .await
        .map(|compromisso| HttpResponse::Ok().json(APIResponse::new(compromisso)))
        .map_err(PlannerError::from)
}

#[derive(Debug, Default)]
pub struct UpdateCompromissoUseCase {
    pub user_id: ID,
    pub compromisso_id: ID,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidDate(InvalidDateError),
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(compromisso_id) => Self::NotFound(format!(
                "The compromisso with id: {}, was not found.",
                compromisso_id
            )),
            UseCaseError::InvalidDate(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateCompromissoUseCase {
    type Response = Compromisso;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateCompromisso";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let mut compromisso = match ctx.repos.compromissos.find(&self.compromisso_id).await {
            Some(compromisso) if compromisso.user_id == self.user_id => compromisso,
            _ => return Err(UseCaseError::NotFound(self.compromisso_id.clone())),
        };
        let now = ctx.sys.get_timestamp_millis();

        if let Some(date) = &self.date {
            let today = local_date(now, &ctx.config.timezone);
            compromisso.date = parse_date(date, today).map_err(UseCaseError::InvalidDate)?;
        }
        if self.start_time.is_some() {
            compromisso.start_time = parse_optional_time(self.start_time.as_deref())
                .map_err(UseCaseError::InvalidDate)?;
        }
        if self.end_time.is_some() {
            compromisso.end_time = parse_optional_time(self.end_time.as_deref())
                .map_err(UseCaseError::InvalidDate)?;
        }
        if let Some(title) = &self.title {
            compromisso.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            compromisso.description = description.clone();
        }
        compromisso.updated = now;

        ctx.repos
            .compromissos
            .save(&compromisso)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(compromisso)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncNotificationsOnCompromissoUpdated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planner_domain::{ScheduledNotification, Tz};
    use planner_infra::StaticTimeSys;
    use std::sync::Arc;

    // 2026-10-19 08:00 UTC
    const NOW: i64 = 1_792_396_800_000;
    const HOUR: i64 = 60 * 60 * 1000;

    #[actix_web::test]
    async fn schedules_new_reminder_when_previous_one_was_sent() {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.config.timezone = Tz::UTC;
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: NOW,
        });
        let user_id = ID::default();
        let mut compromisso = Compromisso::new(
            user_id.clone(),
            chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            NOW,
        );
        compromisso.start_time = chrono::NaiveTime::from_hms_opt(8, 15, 0);
        ctx.repos.compromissos.insert(&compromisso).await.unwrap();
        let mut sent = ScheduledNotification::new(user_id.clone(), "Lembrete".into(), NOW, NOW);
        sent.event_id = Some(compromisso.id.clone());
        sent.sent = true;
        ctx.repos.notifications.insert(&sent).await.unwrap();

        let usecase = UpdateCompromissoUseCase {
            user_id,
            compromisso_id: compromisso.id.clone(),
            start_time: Some("18:00".into()),
            title: Some("Reunião".into()),
            ..Default::default()
        };
        execute(usecase, &ctx).await.unwrap();

        let mut notifications = ctx
            .repos
            .notifications
            .find_by_event(&compromisso.id)
            .await
            .unwrap();
        notifications.sort_by_key(|n| n.send_at);
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].id, sent.id);
        assert!(!notifications[1].sent);
        assert_eq!(notifications[1].send_at, NOW + 9 * HOUR + HOUR / 2);
        assert_eq!(notifications[1].message, "Lembrete: Reunião em 30 minutos");
    }

    #[actix_web::test]
    async fn does_not_schedule_reminders_in_the_past() {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.config.timezone = Tz::UTC;
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: NOW,
        });
        let user_id = ID::default();
        let compromisso = Compromisso::new(
            user_id.clone(),
            chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            NOW,
        );
        ctx.repos.compromissos.insert(&compromisso).await.unwrap();

        let usecase = UpdateCompromissoUseCase {
            user_id,
            compromisso_id: compromisso.id.clone(),
            date: Some("2026-10-01".into()),
            ..Default::default()
        };
        execute(usecase, &ctx).await.unwrap();
        assert!(ctx
            .repos
            .notifications
            .find_by_event(&compromisso.id)
            .await
            .unwrap()
            .is_empty());
    }
}
