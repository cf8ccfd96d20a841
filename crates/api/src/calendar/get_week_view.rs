use crate::error::PlannerError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use planner_api_structs::get_week_view::*;
use planner_domain::{
    format_date,
    grid::{project_days, week_days, DayColumn, GridWindow},
    local_date, parse_date, CalendarEntry, ID,
};
use planner_infra::PlannerContext;

pub async fn get_week_view_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetWeekViewUseCase {
        user_id: user.id,
        week_start: query_params.0.week_start,
    };

    execute(usecase, &ctx)
        .await
        .map(|view| {
            HttpResponse::Ok().json(APIResponse::new(
                format_date(&view.week_start),
                &view.window,
                view.days,
            ))
        })
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct GetWeekViewUseCase {
    pub user_id: ID,
    pub week_start: String,
}

#[derive(Debug)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub window: GridWindow,
    pub days: Vec<DayColumn>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidDate(String),
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDate(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Loads every agenda and compromisso of the user between `from` and `to`
/// and projects them onto `days`
pub async fn load_columns(
    user_id: &ID,
    days: &[NaiveDate],
    window: &GridWindow,
    ctx: &PlannerContext,
) -> anyhow::Result<Vec<DayColumn>> {
    let (from, to) = match (days.first(), days.last()) {
        (Some(from), Some(to)) => (*from, *to),
        _ => return Ok(Vec::new()),
    };
    let agendas = ctx
        .repos
        .agendas
        .find_by_user_between(user_id, from, to)
        .await?;
    let compromissos = ctx
        .repos
        .compromissos
        .find_by_user_between(user_id, from, to)
        .await?;

    let entries = agendas
        .iter()
        .map(|a| a as &dyn CalendarEntry)
        .chain(compromissos.iter().map(|c| c as &dyn CalendarEntry))
        .collect::<Vec<_>>();

    Ok(project_days(&entries, days, window))
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetWeekViewUseCase {
    type Response = WeekView;

    type Error = UseCaseError;

    const NAME: &'static str = "GetWeekView";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let today = local_date(ctx.sys.get_timestamp_millis(), &ctx.config.timezone);
        let week_start = parse_date(&self.week_start, today)
            .map_err(|e| UseCaseError::InvalidDate(e.to_string()))?;

        let window = GridWindow::week();
        let days = week_days(week_start);
        let days = load_columns(&self.user_id, &days, &window, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(WeekView {
            week_start,
            window,
            days,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveTime;
    use planner_domain::{Agenda, Compromisso, EntryKind};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[actix_web::test]
    async fn projects_entries_of_the_week() {
        let ctx = PlannerContext::create_inmemory();
        let user_id = ID::default();

        let mut agenda = Agenda::new(user_id.clone(), date(20), 0);
        agenda.start_time = NaiveTime::from_hms_opt(10, 0, 0);
        agenda.end_time = NaiveTime::from_hms_opt(11, 0, 0);
        agenda.title = "Post".into();
        let mut early = Compromisso::new(user_id.clone(), date(20), 0);
        early.start_time = NaiveTime::from_hms_opt(8, 30, 0);
        early.description = "Dentista".into();
        let next_week = Agenda::new(user_id.clone(), date(26), 0);
        let other_user = Agenda::new(ID::default(), date(20), 0);

        ctx.repos.agendas.insert(&agenda).await.unwrap();
        ctx.repos.agendas.insert(&next_week).await.unwrap();
        ctx.repos.agendas.insert(&other_user).await.unwrap();
        ctx.repos.compromissos.insert(&early).await.unwrap();

        let usecase = GetWeekViewUseCase {
            user_id,
            week_start: "2026-10-19".into(),
        };
        let view = execute(usecase, &ctx).await.unwrap();

        assert_eq!(view.week_start, date(19));
        assert_eq!(view.days.len(), 6);
        assert!(view.days[0].blocks.is_empty());
        let tuesday = &view.days[1];
        assert_eq!(tuesday.date, date(20));
        assert_eq!(tuesday.blocks.len(), 2);
        assert_eq!(tuesday.blocks[0].kind, EntryKind::Compromisso);
        assert_eq!(tuesday.blocks[0].title, "Dentista");
        assert_eq!(tuesday.blocks[1].id, agenda.id);
        assert_eq!(tuesday.blocks[1].top, 120.0);
        assert_eq!(tuesday.blocks[1].height, 60.0);
        assert!(view.days.iter().all(|d| d.date <= date(24)));
    }

    #[actix_web::test]
    async fn rejects_malformed_week_start() {
        let ctx = PlannerContext::create_inmemory();
        let usecase = GetWeekViewUseCase {
            user_id: ID::default(),
            week_start: "19-10-2026".into(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidDate(_))
        ));
    }
}
