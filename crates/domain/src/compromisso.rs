use crate::{
    entry::{CalendarEntry, EntryKind},
    shared::entity::{Entity, ID},
};
use chrono::{NaiveDate, NaiveTime};

/// A personal appointment
#[derive(Debug, Clone, PartialEq)]
pub struct Compromisso {
    pub id: ID,
    pub user_id: ID,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub title: String,
    pub description: String,
    pub created: i64,
    pub updated: i64,
}

impl Compromisso {
    pub fn new(user_id: ID, date: NaiveDate, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            date,
            start_time: None,
            end_time: None,
            title: String::new(),
            description: String::new(),
            created: now,
            updated: now,
        }
    }
}

impl Entity for Compromisso {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl CalendarEntry for Compromisso {
    fn kind(&self) -> EntryKind {
        EntryKind::Compromisso
    }

    fn user_id(&self) -> &ID {
        &self.user_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }

    fn end_time(&self) -> Option<NaiveTime> {
        self.end_time
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }
}
