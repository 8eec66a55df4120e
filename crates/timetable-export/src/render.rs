//! Bundle → page description.
//!
//! Nothing here touches HTML. The tree produced by [`render_page`] is what
//! the HTML emitter walks, and what tests compare against directly.

use serde::Serialize;

use timetable_core::continuity::orphan_continuations;
use timetable_core::keys::{division_title, period_label};
use timetable_core::models::{Bundle, Cell, PeriodRow, Session, Timetable};

use crate::styles::{BREAK_TEXT, CONTINUATION_MARKER, CellClass, Tone};

pub const PERIOD_HEADER: &str = "Period";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub divisions: Vec<DivisionSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivisionSection {
    pub title: String,
    pub table: Table,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<BodyRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyRow {
    pub label: String,
    pub cells: Vec<RenderedCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedCell {
    pub fragments: Vec<Fragment>,
    pub class: Option<CellClass>,
}

/// One line of cell content. Lines are separated by a line break when
/// emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    Text { text: String },
    Strong { text: String },
    Small { text: String },
    Tag { text: String, tone: Tone },
}

impl RenderedCell {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Plain-text view of the content, one fragment per line.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(Fragment::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Fragment {
    pub fn text(&self) -> &str {
        match self {
            Fragment::Text { text }
            | Fragment::Strong { text }
            | Fragment::Small { text }
            | Fragment::Tag { text, .. } => text,
        }
    }
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }
}

/// Build one section per division, in bundle order.
pub fn render_page(bundle: &Bundle) -> Page {
    let divisions = bundle
        .timetables
        .iter()
        .enumerate()
        .map(|(index, timetable)| render_division(index, timetable, &bundle.days))
        .collect();

    Page { divisions }
}

fn render_division(index: usize, timetable: &Timetable, days: &[String]) -> DivisionSection {
    for slot in orphan_continuations(timetable) {
        tracing::warn!(
            division = index + 1,
            period = slot.period + 1,
            day = days.get(slot.day).map(String::as_str).unwrap_or("?"),
            "continuation cell without an opening practical above it"
        );
    }

    let header = std::iter::once(PERIOD_HEADER.to_string())
        .chain(days.iter().cloned())
        .collect();

    let rows = timetable
        .iter()
        .enumerate()
        .map(|(period, row)| render_row(index, period, row, days.len()))
        .collect();

    DivisionSection {
        title: division_title(index),
        table: Table { header, rows },
    }
}

fn render_row(division: usize, period: usize, row: &PeriodRow, day_count: usize) -> BodyRow {
    if row.len() != day_count {
        tracing::warn!(
            division = division + 1,
            period = period + 1,
            cells = row.len(),
            days = day_count,
            "row length differs from day count; fitting row to days"
        );
    }

    let cells = (0..day_count)
        .map(|day| format_cell(row.get(day).and_then(Option::as_ref)))
        .collect();

    BodyRow {
        label: period_label(period),
        cells,
    }
}

/// Map a single slot to its content and CSS class.
pub fn format_cell(cell: Option<&Cell>) -> RenderedCell {
    let Some(cell) = cell else {
        return RenderedCell::default();
    };

    match cell {
        Cell::Empty => RenderedCell::default(),
        Cell::Break => RenderedCell {
            fragments: vec![Fragment::Text {
                text: BREAK_TEXT.to_string(),
            }],
            class: Some(CellClass::BreakCell),
        },
        Cell::Theory(s) => session_cell(s, Tone::Theory, CellClass::SubjectTheory),
        Cell::Practical(p) => session_cell(p, Tone::Practical, CellClass::SubjectPractical),
    }
}

// A continuation keeps its type's class but shows only the marker,
// whichever session type carries the flag.
fn session_cell(session: &Session, tone: Tone, class: CellClass) -> RenderedCell {
    let fragments = if session.continues() {
        vec![Fragment::Text {
            text: CONTINUATION_MARKER.to_string(),
        }]
    } else {
        session_fragments(&session.subject, session.faculty(), session.lab(), tone)
    };

    RenderedCell {
        fragments,
        class: Some(class),
    }
}

fn session_fragments(
    subject: &str,
    faculty: Option<&str>,
    lab: Option<&str>,
    tone: Tone,
) -> Vec<Fragment> {
    let mut fragments = vec![Fragment::Strong {
        text: subject.to_string(),
    }];

    if let Some(faculty) = faculty {
        fragments.push(Fragment::Small {
            text: format!("Faculty: {faculty}"),
        });
    }

    if let Some(lab) = lab {
        fragments.push(Fragment::Small {
            text: lab.to_string(),
        });
    }

    let tag = match tone {
        Tone::Practical => "[PRACTICAL]",
        Tone::Theory => "[THEORY]",
    };
    fragments.push(Fragment::Tag {
        text: tag.to_string(),
        tone,
    });

    fragments
}
