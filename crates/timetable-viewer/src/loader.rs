use timetable_core::keys::TIMETABLE_DATA_KEY;
use timetable_core::models::Bundle;
use timetable_storage::SessionStore;

use crate::error::LoadError;
use crate::state::PageState;

/// Read the bundle the generator left in session storage.
///
/// An unset or empty entry is [`LoadError::MissingData`]. Anything that
/// does not parse as a bundle is [`LoadError::Parse`]. Neither is retried.
pub fn load_bundle(store: &dyn SessionStore) -> Result<PageState, LoadError> {
    let raw = store.get(TIMETABLE_DATA_KEY).map_err(|e| {
        tracing::error!(error = %e, "Error reading timetable data");
        LoadError::Unreadable(e)
    })?;

    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Err(LoadError::MissingData);
    };

    let bundle = Bundle::from_json(&raw).map_err(|e| {
        tracing::error!(error = %e, "Error parsing timetable data");
        LoadError::Parse(e)
    })?;

    tracing::info!(
        divisions = bundle.division_count(),
        days = bundle.days.len(),
        "timetable data loaded"
    );
    Ok(PageState::new(bundle))
}
