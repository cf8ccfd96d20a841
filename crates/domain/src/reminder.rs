use crate::entry::{CalendarEntry, EntryKind};
use chrono::{prelude::*, Duration, LocalResult};
use chrono_tz::Tz;

/// Start time used for entries that were saved without one
pub fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

/// Computes when the reminder for an entry starting at `date` / `start_time`
/// should be sent, as millis since epoch.
///
/// The local datetime is resolved in `tz` and `lead_minutes` are subtracted
/// from the resulting instant, so a reminder for an entry just after
/// midnight lands on the previous day. Returns `None` for local times that
/// do not exist in `tz` (skipped by a DST transition).
pub fn compute_send_at(
    date: NaiveDate,
    start_time: Option<NaiveTime>,
    lead_minutes: i64,
    tz: &Tz,
) -> Option<i64> {
    let start = date.and_time(start_time.unwrap_or_else(default_start_time));
    let start = match tz.from_local_datetime(&start) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => return None,
    };
    Some((start - Duration::minutes(lead_minutes)).timestamp_millis())
}

pub fn reminder_message(kind: EntryKind, title: &str, lead_minutes: i64) -> String {
    let title = if title.trim().is_empty() {
        kind.label()
    } else {
        title
    };
    format!("Lembrete: {} em {} minutos", title, lead_minutes)
}

/// Everything needed to create or reschedule the reminder of a `CalendarEntry`
#[derive(Debug, Clone, PartialEq)]
pub struct EntryReminder {
    pub send_at: i64,
    pub message: String,
}

impl EntryReminder {
    pub fn for_entry(entry: &dyn CalendarEntry, lead_minutes: i64, tz: &Tz) -> Option<Self> {
        let send_at = compute_send_at(entry.date(), entry.start_time(), lead_minutes, tz)?;
        Some(Self {
            send_at,
            message: reminder_message(entry.kind(), entry.title(), lead_minutes),
        })
    }
}
