//! Projection of calendar entries onto the week and day grids.
//!
//! Pure functions only, the api layer loads the entries and hands them over.

use crate::{
    date::{format_time, minutes_of_day},
    entry::{CalendarEntry, EntryKind},
    shared::entity::ID,
};
use chrono::{Duration, NaiveDate, NaiveTime};
use itertools::Itertools;
use serde::Serialize;

/// Entries shorter than this are stretched so they stay clickable
pub const MIN_BLOCK_MINUTES: i64 = 15;

const UNTITLED: &str = "(sem título)";

#[derive(Debug, Clone, PartialEq)]
pub struct GridWindow {
    /// First hour shown on the grid
    pub hour_start: u32,
    /// Last hour shown on the grid
    pub hour_end: u32,
    pub pixels_per_hour: f64,
    /// Distance between two time labels
    pub step_minutes: u32,
}

impl GridWindow {
    pub fn week() -> Self {
        Self {
            hour_start: 8,
            hour_end: 20,
            pixels_per_hour: 60.0,
            step_minutes: 30,
        }
    }

    pub fn day() -> Self {
        Self {
            hour_start: 7,
            hour_end: 22,
            pixels_per_hour: 60.0,
            step_minutes: 30,
        }
    }

    fn pixels_per_minute(&self) -> f64 {
        self.pixels_per_hour / 60.0
    }

    pub fn height(&self) -> f64 {
        (self.hour_end - self.hour_start) as f64 * self.pixels_per_hour
    }

    /// Labels every `step_minutes` from `hour_start` up to and including
    /// the slots of `hour_end`
    pub fn time_slots(&self) -> Vec<TimeSlot> {
        let mut slots = Vec::new();
        for hour in self.hour_start..=self.hour_end {
            let mut minute = 0;
            while minute < 60 {
                slots.push(TimeSlot {
                    hour,
                    minute,
                    label: format!("{:02}:{:02}", hour, minute),
                });
                minute += self.step_minutes;
            }
        }
        slots
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSlot {
    pub hour: u32,
    pub minute: u32,
    pub label: String,
}

/// An entry positioned on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridBlock {
    pub id: ID,
    pub kind: EntryKind,
    pub title: String,
    pub date: NaiveDate,
    pub start_label: String,
    pub end_label: String,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub blocks: Vec<GridBlock>,
}

/// The six days starting at `week_start`
pub fn week_days(week_start: NaiveDate) -> Vec<NaiveDate> {
    (0..6).map(|i| week_start + Duration::days(i)).collect()
}

fn display_title(entry: &dyn CalendarEntry) -> String {
    [entry.title(), entry.description()]
        .iter()
        .find(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| UNTITLED.to_string())
}

pub fn project_entry(entry: &dyn CalendarEntry, window: &GridWindow) -> GridBlock {
    let start = entry.start_time().unwrap_or_default();
    let end = entry
        .end_time()
        .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 30, 0).unwrap_or_default());

    let start_minutes = minutes_of_day(&start);
    let end_minutes = minutes_of_day(&end);
    let minutes_from_start = (start_minutes - window.hour_start as i64 * 60).max(0);
    let duration = (end_minutes - start_minutes).max(MIN_BLOCK_MINUTES);

    GridBlock {
        id: entry.id().clone(),
        kind: entry.kind(),
        title: display_title(entry),
        date: entry.date(),
        start_label: format_time(&start),
        end_label: format_time(&end),
        top: minutes_from_start as f64 * window.pixels_per_minute(),
        height: duration as f64 * window.pixels_per_minute(),
    }
}

/// Projects `entries` into one column per day in `days`. Entries dated
/// outside of `days` are left out and every column is sorted by start time.
pub fn project_days(
    entries: &[&dyn CalendarEntry],
    days: &[NaiveDate],
    window: &GridWindow,
) -> Vec<DayColumn> {
    let mut blocks_by_day = entries
        .iter()
        .filter(|e| days.contains(&e.date()))
        .map(|e| (e.start_time().unwrap_or_default(), project_entry(*e, window)))
        .into_group_map_by(|(_, block)| block.date);

    days.iter()
        .map(|date| {
            let blocks = blocks_by_day
                .remove(date)
                .unwrap_or_default()
                .into_iter()
                .sorted_by_key(|(start, _)| *start)
                .map(|(_, block)| block)
                .collect();
            DayColumn {
                date: *date,
                blocks,
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Agenda, Compromisso};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn time(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    fn compromisso(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Compromisso {
        let mut c = Compromisso::new(ID::default(), date(), 0);
        c.start_time = start;
        c.end_time = end;
        c
    }

    #[test]
    fn positions_blocks_inside_window() {
        let c = compromisso(time(10, 0), time(11, 30));
        let block = project_entry(&c, &GridWindow::week());
        assert_eq!(block.top, 120.0);
        assert_eq!(block.height, 90.0);
        assert_eq!(block.start_label, "10:00");
        assert_eq!(block.end_label, "11:30");
        assert_eq!(block.kind, EntryKind::Compromisso);

        let block = project_entry(&c, &GridWindow::day());
        assert_eq!(block.top, 180.0);
    }

    #[test]
    fn clamps_to_window_start_and_minimum_duration() {
        let early = compromisso(time(6, 0), time(6, 5));
        let block = project_entry(&early, &GridWindow::week());
        assert_eq!(block.top, 0.0);
        assert_eq!(block.height, MIN_BLOCK_MINUTES as f64);

        let reversed = compromisso(time(12, 0), time(11, 0));
        let block = project_entry(&reversed, &GridWindow::week());
        assert_eq!(block.height, MIN_BLOCK_MINUTES as f64);
    }

    #[test]
    fn defaults_missing_times() {
        let block = project_entry(&compromisso(None, None), &GridWindow::week());
        assert_eq!(block.start_label, "00:00");
        assert_eq!(block.end_label, "00:30");
        assert_eq!(block.top, 0.0);
        assert_eq!(block.height, 30.0);
    }

    #[test]
    fn falls_back_on_description_then_placeholder() {
        let mut agenda = Agenda::new(ID::default(), date(), 0);
        assert_eq!(project_entry(&agenda, &GridWindow::week()).title, UNTITLED);
        agenda.description = "Post patrocinado".into();
        assert_eq!(
            project_entry(&agenda, &GridWindow::week()).title,
            "Post patrocinado"
        );
        agenda.title = "Reels".into();
        assert_eq!(project_entry(&agenda, &GridWindow::week()).title, "Reels");
    }

    #[test]
    fn groups_by_day_and_sorts_by_start() {
        let late = compromisso(time(15, 0), time(16, 0));
        let early = compromisso(time(9, 0), time(10, 0));
        let mut next_day = compromisso(time(8, 0), time(9, 0));
        next_day.date = date() + Duration::days(1);
        let mut outside = compromisso(time(8, 0), time(9, 0));
        outside.date = date() + Duration::days(10);

        let days = week_days(date());
        assert_eq!(days.len(), 6);
        let entries: Vec<&dyn CalendarEntry> = vec![&late, &early, &next_day, &outside];
        let columns = project_days(&entries, &days, &GridWindow::week());

        assert_eq!(columns.len(), 6);
        assert_eq!(columns[0].blocks.len(), 2);
        assert_eq!(columns[0].blocks[0].id, early.id);
        assert_eq!(columns[0].blocks[1].id, late.id);
        assert_eq!(columns[1].blocks.len(), 1);
        let total: usize = columns.iter().map(|c| c.blocks.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn generates_time_slots() {
        let slots = GridWindow::week().time_slots();
        assert_eq!(slots.first().unwrap().label, "08:00");
        assert_eq!(slots[1].label, "08:30");
        assert_eq!(slots.last().unwrap().label, "20:30");
        assert_eq!(slots.len(), 26);
        assert_eq!(GridWindow::day().height(), 900.0);
    }
}
