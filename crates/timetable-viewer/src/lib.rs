//! timetable-viewer library root.
//!
//! The results page as a library: load the stored bundle, render it, and
//! run the download and back actions. The binary is a thin CLI over
//! [`presenter::Presenter`]; tests drive the presenter directly.

pub mod config;
pub mod error;
pub mod loader;
pub mod presenter;
pub mod sinks;
pub mod state;
