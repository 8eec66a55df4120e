//! Checks on how practical sessions chain across periods.
//!
//! Rendering does not depend on any of this; a continuation cell is drawn
//! as a marker wherever it appears. These helpers only report positions
//! where the generator broke its own ordering so callers can log them.

use crate::models::Timetable;

/// A `(period, day)` position inside one division's timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub period: usize,
    pub day: usize,
}

/// Continuation cells whose slot directly above is not an opening
/// practical.
pub fn orphan_continuations(timetable: &Timetable) -> Vec<Slot> {
    let mut orphans = Vec::new();

    for (period, row) in timetable.iter().enumerate() {
        for (day, cell) in row.iter().enumerate() {
            let Some(cell) = cell else { continue };
            if !cell.is_continuation() {
                continue;
            }

            let opened = period
                .checked_sub(1)
                .and_then(|prev| timetable.get(prev))
                .and_then(|prev_row| prev_row.get(day))
                .and_then(Option::as_ref)
                .is_some_and(|above| above.starts_practical());

            if !opened {
                orphans.push(Slot { period, day });
            }
        }
    }

    orphans
}
