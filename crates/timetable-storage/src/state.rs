use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::store::SessionStore;

/// Load a JSON value stored under `key`. `Ok(None)` if the key is unset.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn SessionStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    let value: T = serde_json::from_str(&raw)?;
    Ok(Some(value))
}

/// Serialize `value` as JSON and store it under `key`.
pub fn save_json<T: Serialize>(
    store: &dyn SessionStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_string(value)?;
    store.set(key, &body)
}
