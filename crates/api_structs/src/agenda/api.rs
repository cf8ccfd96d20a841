use crate::dtos::AgendaDTO;
use planner_domain::{Agenda, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaResponse {
    pub agenda: AgendaDTO,
}

impl AgendaResponse {
    pub fn new(agenda: Agenda) -> Self {
        Self {
            agenda: AgendaDTO::new(agenda),
        }
    }
}

pub mod create_agenda {
    use super::*;

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// `YYYY-MM-DD` or `DD/MM`
        pub date: String,
        pub start_time: Option<String>,
        pub end_time: Option<String>,
        #[serde(default)]
        pub title: String,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub instagram: String,
        #[serde(default)]
        pub link: String,
        #[serde(default)]
        pub cupom: String,
        #[serde(default)]
        pub anexo: Vec<String>,
    }

    pub type APIResponse = AgendaResponse;
}

pub mod get_agendas {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub agendas: Vec<AgendaDTO>,
    }

    impl APIResponse {
        pub fn new(agendas: Vec<Agenda>) -> Self {
            Self {
                agendas: agendas.into_iter().map(AgendaDTO::new).collect(),
            }
        }
    }
}

pub mod get_agenda {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub agenda_id: ID,
    }

    pub type APIResponse = AgendaResponse;
}

pub mod update_agenda {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub agenda_id: ID,
    }

    /// Absent fields are left untouched. An empty `startTime` or `endTime`
    /// clears the time.
    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub date: Option<String>,
        pub start_time: Option<String>,
        pub end_time: Option<String>,
        pub title: Option<String>,
        pub description: Option<String>,
        pub instagram: Option<String>,
        pub link: Option<String>,
        pub cupom: Option<String>,
        pub anexo: Option<Vec<String>>,
    }

    pub type APIResponse = AgendaResponse;
}

pub mod delete_agenda {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub agenda_id: ID,
    }

    pub type APIResponse = AgendaResponse;
}
