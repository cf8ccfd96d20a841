use planner_domain::{format_date, format_time, Agenda, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgendaDTO {
    pub id: ID,
    pub user_id: ID,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub title: String,
    pub description: String,
    pub instagram: String,
    pub link: String,
    pub cupom: String,
    pub anexo: Vec<String>,
    pub created: i64,
    pub updated: i64,
}

impl AgendaDTO {
    pub fn new(agenda: Agenda) -> Self {
        Self {
            id: agenda.id,
            user_id: agenda.user_id,
            date: format_date(&agenda.date),
            start_time: agenda.start_time.as_ref().map(format_time),
            end_time: agenda.end_time.as_ref().map(format_time),
            title: agenda.title,
            description: agenda.description,
            instagram: agenda.instagram,
            link: agenda.link,
            cupom: agenda.cupom,
            anexo: agenda.anexo,
            created: agenda.created,
            updated: agenda.updated,
        }
    }
}
