use crate::error::PlannerError;
use crate::notification::subscribers::SyncNotificationsOnAgendaCreated;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::create_agenda::*;
use planner_domain::{
    local_date, parse_date, parse_optional_time, Agenda, InvalidDateError, User,
};
use planner_infra::PlannerContext;

pub async fn create_agenda_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateAgendaUseCase {
        user,
        date: body.date,
        start_time: body.start_time,
        end_time: body.end_time,
        title: body.title,
        description: body.description,
        instagram: body.instagram,
        link: body.link,
        cupom: body.cupom,
        anexo: body.anexo,
    };

    execute(usecase, &ctx)
        .await
        .map(|agenda| HttpResponse::Created().json(APIResponse::new(agenda)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct CreateAgendaUseCase {
    pub user: User,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub title: String,
    pub description: String,
    pub instagram: String,
    pub link: String,
    pub cupom: String,
    pub anexo: Vec<String>,
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
impl UseCase for CreateAgendaUseCase {
    type Response = Agenda;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateAgenda";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let today = local_date(now, &ctx.config.timezone);
        let date = parse_date(&self.date, today).map_err(UseCaseError::InvalidDate)?;

        let mut agenda = Agenda::new(self.user.id.clone(), date, now);
        agenda.start_time =
            parse_optional_time(self.start_time.as_deref()).map_err(UseCaseError::InvalidDate)?;
        agenda.end_time =
            parse_optional_time(self.end_time.as_deref()).map_err(UseCaseError::InvalidDate)?;
        agenda.title = self.title.trim().to_string();
        agenda.description = self.description.clone();
        agenda.instagram = self.instagram.trim().to_string();
        agenda.link = self.link.trim().to_string();
        agenda.cupom = self.cupom.trim().to_string();
        agenda.anexo = self.anexo.clone();

        ctx.repos
            .agendas
            .insert(&agenda)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(agenda)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncNotificationsOnAgendaCreated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use planner_domain::{Tz, ID};
    use planner_infra::StaticTimeSys;
    use std::sync::Arc;

    fn setup() -> PlannerContext {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.config.timezone = Tz::UTC;
        // 2026-10-19 08:00 UTC
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: 1_792_396_800_000,
        });
        ctx
    }

    fn usecase(user: &User, date: &str, start_time: Option<&str>) -> CreateAgendaUseCase {
        CreateAgendaUseCase {
            user: user.clone(),
            date: date.into(),
            start_time: start_time.map(String::from),
            end_time: None,
            title: "Publi Natura".into(),
            description: String::new(),
            instagram: "@natura".into(),
            link: String::new(),
            cupom: "NATURA10".into(),
            anexo: vec!["anexos/roteiro.pdf".into()],
        }
    }

    #[actix_web::test]
    async fn creates_agenda_and_schedules_reminder() {
        let ctx = setup();
        let user = User::new(ID::default());

        let agenda = execute(usecase(&user, "2026-10-19", Some("10:00")), &ctx)
            .await
            .unwrap();
        assert_eq!(agenda.date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(agenda.start_time, NaiveTime::from_hms_opt(10, 0, 0));
        assert!(ctx.repos.agendas.find(&agenda.id).await.is_some());

        let notifications = ctx.repos.notifications.find_by_event(&agenda.id).await.unwrap();
        assert_eq!(notifications.len(), 1);
        // 09:30 UTC
        assert_eq!(notifications[0].send_at, 1_792_396_800_000 + 90 * 60 * 1000);
        assert_eq!(notifications[0].message, "Lembrete: Publi Natura em 30 minutos");
        assert_eq!(notifications[0].user_id, user.id);
        assert!(notifications[0].subscription.is_none());
    }

    #[actix_web::test]
    async fn accepts_day_month_dates() {
        let ctx = setup();
        let user = User::new(ID::default());
        let mut usecase = usecase(&user, "24/12", None);
        let agenda = usecase.execute(&ctx).await.unwrap();
        assert_eq!(agenda.date, NaiveDate::from_ymd_opt(2026, 12, 24).unwrap());
        assert!(agenda.start_time.is_none());
    }

    #[actix_web::test]
    async fn rejects_invalid_dates_and_times() {
        let ctx = setup();
        let user = User::new(ID::default());
        let invalid = vec![
            ("2026-13-01", None),
            ("amanhã", None),
            ("2026-10-19", Some("25:00")),
        ];
        for (date, time) in invalid {
            let mut usecase = usecase(&user, date, time);
            let res = usecase.execute(&ctx).await;
            assert!(matches!(res, Err(UseCaseError::InvalidDate(_))));
        }
        assert!(ctx.repos.agendas.find_by_user(&user.id).await.unwrap().is_empty());
    }
}
