//! Storage key, route and filename conventions.
//!
//! These are the fixed names the page agrees on with the upstream
//! generator and the PDF service.

/// Session storage key holding the JSON-serialized bundle.
pub const TIMETABLE_DATA_KEY: &str = "timetableData";

/// Server path accepting a bundle and answering with a PDF document.
pub const DOWNLOAD_PDF_PATH: &str = "/api/download-pdf";

/// Route the navigation action redirects to.
pub const ENTRY_ROUTE: &str = "/entry";

/// Filename offered for the downloaded document.
pub const PDF_FILENAME: &str = "timetable.pdf";

pub fn division_title(index: usize) -> String {
    format!("Division {}", index + 1)
}

pub fn period_label(index: usize) -> String {
    format!("P{}", index + 1)
}
