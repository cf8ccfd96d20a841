use super::get_week_view::load_columns;
use crate::error::PlannerError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use planner_api_structs::get_day_view::*;
use planner_domain::{
    format_date,
    grid::{DayColumn, GridWindow},
    local_date, parse_date, ID,
};
use planner_infra::PlannerContext;

pub async fn get_day_view_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetDayViewUseCase {
        user_id: user.id,
        date: query_params.0.date,
    };

    execute(usecase, &ctx)
        .await
        .map(|view| {
            HttpResponse::Ok().json(APIResponse::new(
                format_date(&view.date),
                &view.window,
                Some(view.column),
            ))
        })
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct GetDayViewUseCase {
    pub user_id: ID,
    pub date: String,
}

#[derive(Debug)]
pub struct DayView {
    pub date: NaiveDate,
    pub window: GridWindow,
    pub column: DayColumn,
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

#[async_trait::async_trait(?Send)]
impl UseCase for GetDayViewUseCase {
    type Response = DayView;

    type Error = UseCaseError;

    const NAME: &'static str = "GetDayView";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let today = local_date(ctx.sys.get_timestamp_millis(), &ctx.config.timezone);
        let date = parse_date(&self.date, today)
            .map_err(|e| UseCaseError::InvalidDate(e.to_string()))?;

        let window = GridWindow::day();
        let column = load_columns(&self.user_id, &[date], &window, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .pop()
            .unwrap_or(DayColumn {
                date,
                blocks: Vec::new(),
            });

        Ok(DayView {
            date,
            window,
            column,
        })
    }
}
