use crate::error::PlannerError;
use crate::notification::subscribers::SyncNotificationsOnAgendaUpdated;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use planner_api_structs::update_agenda::*;
use planner_domain::{
    local_date, parse_date, parse_optional_time, Agenda, InvalidDateError, ID,
};
use planner_infra::PlannerContext;

pub async fn update_agenda_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateAgendaUseCase {
        user_id: user.id,
        agenda_id: path_params.into_inner().agenda_id,
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
        .map(|agenda| HttpResponse::Ok().json(APIResponse::new(agenda)))
        .map_err(PlannerError::from)
}

/// Fields set to `None` are left unchanged
#[derive(Debug, Default)]
pub struct UpdateAgendaUseCase {
    pub user_id: ID,
    pub agenda_id: ID,
    pub date: Option<String>,
    /// An empty string clears the time
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub instagram: Option<String>,
    pub link: Option<String>,
    pub cupom: Option<String>,
    pub anexo: Option<Vec<String>>,
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
            UseCaseError::NotFound(agenda_id) => Self::NotFound(format!(
                "The agenda with id: {}, was not found.",
                agenda_id
            )),
            UseCaseError::InvalidDate(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateAgendaUseCase {
    type Response = Agenda;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateAgenda";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let mut agenda = match ctx.repos.agendas.find(&self.agenda_id).await {
            Some(agenda) if agenda.user_id == self.user_id => agenda,
            _ => return Err(UseCaseError::NotFound(self.agenda_id.clone())),
        };
        let now = ctx.sys.get_timestamp_millis();

        if let Some(date) = &self.date {
            let today = local_date(now, &ctx.config.timezone);
            agenda.date = parse_date(date, today).map_err(UseCaseError::InvalidDate)?;
        }
        if self.start_time.is_some() {
            agenda.start_time = parse_optional_time(self.start_time.as_deref())
                .map_err(UseCaseError::InvalidDate)?;
        }
        if self.end_time.is_some() {
            agenda.end_time = parse_optional_time(self.end_time.as_deref())
                .map_err(UseCaseError::InvalidDate)?;
        }
        if let Some(title) = &self.title {
            agenda.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            agenda.description = description.clone();
        }
        if let Some(instagram) = &self.instagram {
            agenda.instagram = instagram.trim().to_string();
        }
        if let Some(link) = &self.link {
            agenda.link = link.trim().to_string();
        }
        if let Some(cupom) = &self.cupom {
            agenda.cupom = cupom.trim().to_string();
        }
        if let Some(anexo) = &self.anexo {
            agenda.anexo = anexo.clone();
        }
        agenda.updated = now;

        ctx.repos
            .agendas
            .save(&agenda)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(agenda)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncNotificationsOnAgendaUpdated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::agenda::CreateAgendaUseCase;
    use chrono::NaiveTime;
    use planner_domain::{Tz, User};
    use planner_infra::StaticTimeSys;
    use std::sync::Arc;

    // 2026-10-19 08:00 UTC
    const NOW: i64 = 1_792_396_800_000;

    async fn setup() -> (PlannerContext, User, Agenda) {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.config.timezone = Tz::UTC;
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: NOW,
        });
        let user = User::new(ID::default());
        let create = CreateAgendaUseCase {
            user: user.clone(),
            date: "2026-10-19".into(),
            start_time: Some("10:00".into()),
            end_time: Some("11:00".into()),
            title: "Gravação".into(),
            description: String::new(),
            instagram: String::new(),
            link: String::new(),
            cupom: String::new(),
            anexo: Vec::new(),
        };
        let agenda = execute(create, &ctx).await.unwrap();
        (ctx, user, agenda)
    }

    #[actix_web::test]
    async fn updates_fields_and_reschedules_reminder() {
        let (ctx, user, agenda) = setup().await;

        let usecase = UpdateAgendaUseCase {
            user_id: user.id.clone(),
            agenda_id: agenda.id.clone(),
            start_time: Some("15:00".into()),
            cupom: Some(" NOVO20 ".into()),
            ..Default::default()
        };
        let updated = execute(usecase, &ctx).await.unwrap();
        assert_eq!(updated.start_time, NaiveTime::from_hms_opt(15, 0, 0));
        assert_eq!(updated.end_time, NaiveTime::from_hms_opt(11, 0, 0));
        assert_eq!(updated.cupom, "NOVO20");
        assert_eq!(updated.title, "Gravação");

        let notifications = ctx.repos.notifications.find_by_event(&agenda.id).await.unwrap();
        assert_eq!(notifications.len(), 1);
        // 14:30 UTC
        assert_eq!(notifications[0].send_at, NOW + 6 * 60 * 60 * 1000 + 30 * 60 * 1000);
    }

    #[actix_web::test]
    async fn clears_time_with_empty_string() {
        let (ctx, user, agenda) = setup().await;

        let mut usecase = UpdateAgendaUseCase {
            user_id: user.id.clone(),
            agenda_id: agenda.id.clone(),
            end_time: Some("".into()),
            ..Default::default()
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert!(updated.end_time.is_none());
        assert!(updated.start_time.is_some());
    }

    #[actix_web::test]
    async fn rejects_updates_from_other_users() {
        let (ctx, _user, agenda) = setup().await;

        let mut usecase = UpdateAgendaUseCase {
            user_id: ID::default(),
            agenda_id: agenda.id.clone(),
            title: Some("Hacked".into()),
            ..Default::default()
        };
        let res = usecase.execute(&ctx).await;
        assert_eq!(res, Err(UseCaseError::NotFound(agenda.id.clone())));
        assert_eq!(ctx.repos.agendas.find(&agenda.id).await.unwrap().title, "Gravação");
    }
}
