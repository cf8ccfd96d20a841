use crate::{APIResponse, BaseClient};
use planner_api_structs::*;
use planner_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AgendaClient {
    base: Arc<BaseClient>,
}

pub type CreateAgendaInput = create_agenda::RequestBody;
pub type UpdateAgendaInput = update_agenda::RequestBody;

impl AgendaClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateAgendaInput,
    ) -> APIResponse<create_agenda::APIResponse> {
        self.base
            .post(input, "agendas".into(), StatusCode::CREATED)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_agendas::APIResponse> {
        self.base.get("agendas".into(), StatusCode::OK).await
    }

    pub async fn get(&self, agenda_id: ID) -> APIResponse<get_agenda::APIResponse> {
        self.base
            .get(format!("agendas/{}", agenda_id), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        agenda_id: ID,
        input: UpdateAgendaInput,
    ) -> APIResponse<update_agenda::APIResponse> {
        self.base
            .put(input, format!("agendas/{}", agenda_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, agenda_id: ID) -> APIResponse<delete_agenda::APIResponse> {
        self.base
            .delete(format!("agendas/{}", agenda_id), StatusCode::OK)
            .await
    }
}
