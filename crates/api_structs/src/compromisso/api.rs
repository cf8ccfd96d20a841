use crate::dtos::CompromissoDTO;
use planner_domain::{Compromisso, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompromissoResponse {
    pub compromisso: CompromissoDTO,
}

impl CompromissoResponse {
    pub fn new(compromisso: Compromisso) -> Self {
        Self {
            compromisso: CompromissoDTO::new(compromisso),
        }
    }
}

pub mod create_compromisso {
    use super::*;

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub date: String,
        pub start_time: Option<String>,
        pub end_time: Option<String>,
        #[serde(default)]
        pub title: String,
        #[serde(default)]
        pub description: String,
    }

    pub type APIResponse = CompromissoResponse;
}

pub mod get_compromissos {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub compromissos: Vec<CompromissoDTO>,
    }

    impl APIResponse {
        pub fn new(compromissos: Vec<Compromisso>) -> Self {
            Self {
                compromissos: compromissos.into_iter().map(CompromissoDTO::new).collect(),
            }
        }
    }
}

pub mod get_compromisso {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub compromisso_id: ID,
    }

    pub type APIResponse = CompromissoResponse;
}

pub mod update_compromisso {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub compromisso_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub date: Option<String>,
        pub start_time: Option<String>,
        pub end_time: Option<String>,
        pub title: Option<String>,
        pub description: Option<String>,
    }

    pub type APIResponse = CompromissoResponse;
}

pub mod delete_compromisso {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub compromisso_id: ID,
    }

    pub type APIResponse = CompromissoResponse;
}
