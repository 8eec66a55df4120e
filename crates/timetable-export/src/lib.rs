//! timetable-export
//!
//! Turns a bundle into a declarative page description, emits that page as
//! HTML, and fetches the PDF rendition from the document service.

pub mod error;
pub mod html;
pub mod pdf;
pub mod render;
pub mod styles;
