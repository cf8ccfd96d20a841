use planner_domain::{format_date, format_time, Compromisso, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompromissoDTO {
    pub id: ID,
    pub user_id: ID,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub title: String,
    pub description: String,
    pub created: i64,
    pub updated: i64,
}

impl CompromissoDTO {
    pub fn new(compromisso: Compromisso) -> Self {
        Self {
            id: compromisso.id,
            user_id: compromisso.user_id,
            date: format_date(&compromisso.date),
            start_time: compromisso.start_time.as_ref().map(format_time),
            end_time: compromisso.end_time.as_ref().map(format_time),
            title: compromisso.title,
            description: compromisso.description,
            created: compromisso.created,
            updated: compromisso.updated,
        }
    }
}
