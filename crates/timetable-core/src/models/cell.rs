use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single slot in the grid, tagged on the JSON `type` field.
///
/// A missing slot is `None` at the row level rather than a variant here;
/// `Empty` exists because the generator sometimes emits `{"type": "empty"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum Cell {
    Empty,
    Break,
    Theory(Session),
    Practical(Session),
}

/// A taught slot. The second period of a two-period session carries
/// `is_continuation = true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    #[serde(default)]
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_continuation: Option<bool>,
}

impl Session {
    pub fn faculty(&self) -> Option<&str> {
        non_blank(self.faculty.as_deref())
    }

    pub fn lab(&self) -> Option<&str> {
        non_blank(self.lab.as_deref())
    }

    pub fn continues(&self) -> bool {
        self.is_continuation.unwrap_or(false)
    }
}

impl Cell {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Cell::Theory(s) | Cell::Practical(s) => Some(s),
            Cell::Empty | Cell::Break => None,
        }
    }

    /// Any taught slot flagged as the tail of a multi-period session.
    pub fn is_continuation(&self) -> bool {
        self.session().is_some_and(Session::continues)
    }

    /// A practical that opens a session, i.e. one a continuation may follow.
    pub fn starts_practical(&self) -> bool {
        matches!(self, Cell::Practical(p) if !p.continues())
    }
}

// Empty strings are treated as absent, matching how the generator's
// front end tests these fields.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
