use crate::{APIResponse, BaseClient};
use planner_api_structs::*;
use planner_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct CompromissoClient {
    base: Arc<BaseClient>,
}

pub type CreateCompromissoInput = create_compromisso::RequestBody;
pub type UpdateCompromissoInput = update_compromisso::RequestBody;

impl CompromissoClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateCompromissoInput,
    ) -> APIResponse<create_compromisso::APIResponse> {
        self.base
            .post(input, "compromissos".into(), StatusCode::CREATED)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_compromissos::APIResponse> {
        self.base.get("compromissos".into(), StatusCode::OK).await
    }

    pub async fn get(&self, compromisso_id: ID) -> APIResponse<get_compromisso::APIResponse> {
        self.base
            .get(format!("compromissos/{}", compromisso_id), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        compromisso_id: ID,
        input: UpdateCompromissoInput,
    ) -> APIResponse<update_compromisso::APIResponse> {
        self.base
            .put(input, format!("compromissos/{}", compromisso_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, compromisso_id: ID) -> APIResponse<delete_compromisso::APIResponse> {
        self.base
            .delete(format!("compromissos/{}", compromisso_id), StatusCode::OK)
            .await
    }
}
