use crate::error::StorageError;

/// String-keyed, string-valued storage that lives for one browsing session.
///
/// Implementations must be safe to share between the loader and the
/// navigation action.
pub trait SessionStore: Send + Sync {
    /// Returns `Ok(None)` when the key has never been set or was removed.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
