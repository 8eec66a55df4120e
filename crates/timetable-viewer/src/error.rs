use std::path::PathBuf;

use thiserror::Error;

use timetable_core::error::CoreError;
use timetable_export::error::ExportError;
use timetable_storage::error::StorageError;

use crate::state::LoadFailure;

/// Terminal failures while loading the stored bundle.
///
/// The `Display` text is what the user sees in the status element.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No timetable data found!")]
    MissingData,

    #[error("Error loading timetable!")]
    Unreadable(#[source] StorageError),

    #[error("Error loading timetable!")]
    Parse(#[source] CoreError),
}

impl LoadError {
    pub fn failure(&self) -> LoadFailure {
        match self {
            LoadError::MissingData => LoadFailure::NoData,
            LoadError::Unreadable(_) | LoadError::Parse(_) => LoadFailure::ParseError,
        }
    }
}

/// Failures of the download action. None of them affect the rendered page.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("failed to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
