use serde::{Deserialize, Serialize};

/// Marker shown in place of the second period of a practical.
pub const CONTINUATION_MARKER: &str = "↑ PRACTICAL (Contd.)";

pub const BREAK_TEXT: &str = "BREAK";

/// CSS class attached to a body cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellClass {
    BreakCell,
    SubjectPractical,
    SubjectTheory,
}

impl CellClass {
    pub fn as_str(self) -> &'static str {
        match self {
            CellClass::BreakCell => "break-cell",
            CellClass::SubjectPractical => "subject-practical",
            CellClass::SubjectTheory => "subject-theory",
        }
    }
}

/// Which session type a trailing tag announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Practical,
    Theory,
}

/// Colours applied when the page is emitted as HTML. Unset colours fall
/// back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyles {
    /// Text colour of the `[PRACTICAL]` tag.
    pub practical_tag_color: String,

    /// Text colour of the `[THEORY]` tag.
    pub theory_tag_color: String,
}

impl Default for TableStyles {
    fn default() -> Self {
        Self {
            practical_tag_color: "#8B4513".to_string(),
            theory_tag_color: "#1F4E78".to_string(),
        }
    }
}
