use crate::shared::entity::{Entity, ID};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The two kinds of entries a user can put in the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Publication style entry with marketing metadata
    Agenda,
    /// Personal appointment
    Compromisso,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agenda => "agenda",
            Self::Compromisso => "compromisso",
        }
    }

    /// Human readable label, used when an entry has no title
    pub fn label(&self) -> &'static str {
        match self {
            Self::Agenda => "Agenda",
            Self::Compromisso => "Compromisso",
        }
    }
}

/// Common view over `Agenda` and `Compromisso` used by the reminder
/// scheduling and the calendar grid
pub trait CalendarEntry: Entity + Debug {
    fn kind(&self) -> EntryKind;
    fn user_id(&self) -> &ID;
    fn date(&self) -> NaiveDate;
    fn start_time(&self) -> Option<NaiveTime>;
    fn end_time(&self) -> Option<NaiveTime>;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
}
