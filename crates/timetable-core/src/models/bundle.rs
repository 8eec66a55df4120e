use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::cell::Cell;

/// One cell per day; position is the day index.
pub type PeriodRow = Vec<Option<Cell>>;

/// One row per period for a single division.
pub type Timetable = Vec<PeriodRow>;

/// The payload handed from the generator to the results page and on to
/// the PDF service.
///
/// `config` is whatever the generator was configured with. It is never
/// inspected here and is sent back to the server exactly as loaded: an
/// absent key stays absent and an explicit `null` stays `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bundle {
    pub timetables: Vec<Timetable>,
    pub days: Vec<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(optional)]
    pub config: Option<serde_json::Value>,
}

// Only called when the key exists, so `null` becomes `Some(Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl Bundle {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn division_count(&self) -> usize {
        self.timetables.len()
    }
}
