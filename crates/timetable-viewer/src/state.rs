use std::sync::Arc;

use timetable_core::models::Bundle;

/// The loaded bundle. Created once per page load and never mutated.
///
/// Cloning is cheap; the render and download paths each take their own
/// handle instead of reading shared globals.
#[derive(Debug, Clone)]
pub struct PageState {
    bundle: Arc<Bundle>,
}

impl PageState {
    pub fn new(bundle: Bundle) -> Self {
        Self {
            bundle: Arc::new(bundle),
        }
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }
}

/// Where the page is in its lifecycle.
///
/// `Uninitialized → Loaded → Rendered` on success, or
/// `Uninitialized → Failed` when there is nothing usable in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    Uninitialized,
    Loaded,
    Rendered,
    Failed(LoadFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    NoData,
    ParseError,
}

impl PagePhase {
    pub fn is_terminal_failure(self) -> bool {
        matches!(self, PagePhase::Failed(_))
    }
}
