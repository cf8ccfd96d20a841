use crate::dtos::{DayColumnDTO, TimeSlotDTO};
use planner_domain::grid::{DayColumn, GridWindow};
use serde::{Deserialize, Serialize};

fn slots(window: &GridWindow) -> Vec<TimeSlotDTO> {
    window
        .time_slots()
        .into_iter()
        .map(|slot| TimeSlotDTO {
            hour: slot.hour,
            minute: slot.minute,
            label: slot.label,
        })
        .collect()
}

pub mod get_week_view {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        /// First day of the week, `YYYY-MM-DD`
        pub week_start: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub week_start: String,
        pub slots: Vec<TimeSlotDTO>,
        /// Total height of the grid in pixels
        pub height: f64,
        pub days: Vec<DayColumnDTO>,
    }

    impl APIResponse {
        pub fn new(week_start: String, window: &GridWindow, days: Vec<DayColumn>) -> Self {
            Self {
                week_start,
                slots: slots(window),
                height: window.height(),
                days: days.into_iter().map(DayColumnDTO::new).collect(),
            }
        }
    }
}

pub mod get_day_view {
    use super::*;
    use crate::dtos::GridBlockDTO;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub date: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub date: String,
        pub slots: Vec<TimeSlotDTO>,
        pub height: f64,
        pub blocks: Vec<GridBlockDTO>,
    }

    impl APIResponse {
        pub fn new(date: String, window: &GridWindow, column: Option<DayColumn>) -> Self {
            let blocks = column
                .map(|c| DayColumnDTO::new(c).blocks)
                .unwrap_or_default();
            Self {
                date,
                slots: slots(window),
                height: window.height(),
                blocks,
            }
        }
    }
}
