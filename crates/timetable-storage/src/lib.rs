//! timetable-storage
//!
//! Transient key-value storage for the results page. A thin trait with an
//! in-memory and a directory-backed implementation.

pub mod dir;
pub mod error;
pub mod memory;
pub mod state;
pub mod store;

pub use dir::DirStore;
pub use memory::MemoryStore;
pub use store::SessionStore;
