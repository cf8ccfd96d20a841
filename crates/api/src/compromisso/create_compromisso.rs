use crate::error::PlannerError;
use crate::notification::subscribers::SyncNotificationsOnCompromissoCreated;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::create_compromisso::*;
use planner_domain::{
    local_date, parse_date, parse_optional_time, Compromisso, InvalidDateError, User,
};
use planner_infra::PlannerContext;

pub async fn create_compromisso_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateCompromissoUseCase {
        user,
        date: body.date,
        start_time: body.start_time,
        end_time: body.end_time,
        title: body.title,
        description: body.description,
    };

    execute(usecase, &ctx)
        .await
        .map(|compromisso| HttpResponse::Created().json(APIResponse::new(compromisso)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct CreateCompromissoUseCase {
    pub user: User,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub title: String,
    pub description: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidDate(InvalidDateError),
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDate(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateCompromissoUseCase {
    type Response = Compromisso;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateCompromisso";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let today = local_date(now, &ctx.config.timezone);
        let date = parse_date(&self.date, today).map_err(UseCaseError::InvalidDate)?;

        let mut compromisso = Compromisso::new(self.user.id.clone(), date, now);
        compromisso.start_time =
            parse_optional_time(self.start_time.as_deref()).map_err(UseCaseError::InvalidDate)?;
        compromisso.end_time =
            parse_optional_time(self.end_time.as_deref()).map_err(UseCaseError::InvalidDate)?;
        compromisso.title = self.title.trim().to_string();
        compromisso.description = self.description.clone();

        ctx.repos
            .compromissos
            .insert(&compromisso)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(compromisso)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncNotificationsOnCompromissoCreated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planner_domain::{Tz, ID};
    use planner_infra::StaticTimeSys;
    use std::sync::Arc;

    #[actix_web::test]
    async fn reminder_for_entry_just_after_midnight_is_sent_the_day_before() {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.config.timezone = Tz::UTC;
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: 0,
        });
        let usecase = CreateCompromissoUseCase {
            user: User::new(ID::default()),
            date: "2026-10-20".into(),
            start_time: Some("00:10".into()),
            end_time: None,
            title: String::new(),
            description: "Voo para Lisboa".into(),
        };
        let compromisso = execute(usecase, &ctx).await.unwrap();

        let notifications = ctx
            .repos
            .notifications
            .find_by_event(&compromisso.id)
            .await
            .unwrap();
        assert_eq!(notifications.len(), 1);
        // 2026-10-19 23:40 UTC
        assert_eq!(notifications[0].send_at, 1_792_453_200_000);
        assert_eq!(
            notifications[0].message,
            "Lembrete: Compromisso em 30 minutos"
        );
    }
}
