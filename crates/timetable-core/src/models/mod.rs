pub mod bundle;
pub mod cell;

pub use bundle::{Bundle, PeriodRow, Timetable};
pub use cell::{Cell, Session};
