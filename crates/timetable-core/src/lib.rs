//! timetable-core
//!
//! Pure domain types for a generated timetable bundle, plus the storage
//! key and route conventions shared by the viewer and the export client.
//! No I/O happens in this crate.

pub mod continuity;
pub mod error;
pub mod keys;
pub mod models;
