//! Where the page's user-facing side effects land.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::DownloadError;

/// Blocking, user-facing alert.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Receives a finished download under a suggested filename.
pub trait DownloadSink: Send + Sync {
    /// Returns the final location of the saved file. A failure is a
    /// [`DownloadError::Save`] naming the location that was attempted.
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError>;
}

/// Writes alerts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Saves downloads into a directory.
///
/// Bytes go to a temporary file next to the target first and are renamed
/// into place, so a failed save never leaves a partial document behind.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectoryDownloads {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError> {
        let target = self.dir.join(filename);
        write_atomically(&self.dir, &target, bytes).map_err(|source| DownloadError::Save {
            path: target.clone(),
            source,
        })?;
        Ok(target)
    }
}

fn write_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
