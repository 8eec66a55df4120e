use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use timetable_export::styles::TableStyles;

/// Bumped whenever a stored field is added or reshaped; see [`migrate`].
const CURRENT_VERSION: u32 = 1;

const APP_DIR: &str = "timetable-viewer";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

pub const ENV_SERVER_URL: &str = "TIMETABLE_SERVER_URL";
pub const ENV_STORAGE_DIR: &str = "TIMETABLE_STORAGE_DIR";
pub const ENV_DOWNLOAD_DIR: &str = "TIMETABLE_DOWNLOAD_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,

    /// Base URL of the server hosting the PDF endpoint.
    pub server_url: String,

    /// Directory backing session storage. `None` = platform data dir.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,

    /// Where downloads are saved. Added in v1; `None` = platform
    /// downloads dir.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    #[serde(default)]
    pub styles: TableStyles,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            server_url: DEFAULT_SERVER_URL.to_string(),
            storage_dir: None,
            download_dir: None,
            styles: TableStyles::default(),
        }
    }
}

impl ViewerConfig {
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|base| base.join(APP_DIR).join("session"))
                .unwrap_or_else(|| PathBuf::from(".timetable-session"))
        })
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Apply overrides from a variable lookup (normally the process env).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_SERVER_URL).filter(|v| !v.is_empty()) {
            self.server_url = url;
        }
        if let Some(dir) = lookup(ENV_STORAGE_DIR).filter(|v| !v.is_empty()) {
            self.storage_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = lookup(ENV_DOWNLOAD_DIR).filter(|v| !v.is_empty()) {
            self.download_dir = Some(PathBuf::from(dir));
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join(APP_DIR))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config file, or defaults when none exists yet.
pub fn load_config() -> eyre::Result<ViewerConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(ViewerConfig::default());
    }
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> eyre::Result<ViewerConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

/// Parse raw JSON, running migrations before deserializing.
pub fn parse_config(contents: &str) -> eyre::Result<ViewerConfig> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: ViewerConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Bring an on-disk config up to [`CURRENT_VERSION`], one step at a time.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: add download_dir
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("download_dir").or_insert(serde_json::Value::Null);
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added download_dir)");
    }

    Ok(json)
}

pub fn save_config(config: &ViewerConfig) -> eyre::Result<()> {
    save_config_to(&config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &ViewerConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;

    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
