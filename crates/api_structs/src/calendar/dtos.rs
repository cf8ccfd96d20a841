use planner_domain::{
    format_date,
    grid::{DayColumn, GridBlock},
    EntryKind, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridBlockDTO {
    pub id: ID,
    pub kind: EntryKind,
    pub title: String,
    pub date: String,
    pub start_label: String,
    pub end_label: String,
    /// Offset in pixels from the top of the grid
    pub top: f64,
    pub height: f64,
}

impl GridBlockDTO {
    pub fn new(block: GridBlock) -> Self {
        Self {
            id: block.id,
            kind: block.kind,
            title: block.title,
            date: format_date(&block.date),
            start_label: block.start_label,
            end_label: block.end_label,
            top: block.top,
            height: block.height,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayColumnDTO {
    pub date: String,
    pub blocks: Vec<GridBlockDTO>,
}

impl DayColumnDTO {
    pub fn new(column: DayColumn) -> Self {
        Self {
            date: format_date(&column.date),
            blocks: column.blocks.into_iter().map(GridBlockDTO::new).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotDTO {
    pub hour: u32,
    pub minute: u32,
    pub label: String,
}
