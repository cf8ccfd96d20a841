use crate::{APIResponse, BaseClient};
use planner_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

/// Read only grid views of the agendas and compromissos of the user
#[derive(Clone)]
pub struct CalendarClient {
    base: Arc<BaseClient>,
}

impl CalendarClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// `week_start` as `YYYY-MM-DD` or `DD/MM`
    pub async fn week(&self, week_start: &str) -> APIResponse<get_week_view::APIResponse> {
        self.base
            .get(
                format!("calendar/week?weekStart={}", week_start),
                StatusCode::OK,
            )
            .await
    }

    pub async fn day(&self, date: &str) -> APIResponse<get_day_view::APIResponse> {
        self.base
            .get(format!("calendar/day?date={}", date), StatusCode::OK)
            .await
    }
}
