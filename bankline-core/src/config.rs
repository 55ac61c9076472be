//! Client settings
//!
//! Settings live in `settings.json` inside the bankline directory:
//! ```json
//! {
//!   "api": { "baseUrl": "https://bank.example.com/api", "timeoutSecs": 30 },
//!   ...
//! }
//! ```
//! Keys this crate does not manage are preserved on save.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// Default API location for a locally running backend
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "BANKLINE_API_URL";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

const SETTINGS_FILENAME: &str = "settings.json";

/// Read `settings.json`; a missing file is `None`, an unparsable one is
/// reported and treated as empty
fn read_settings(path: &Path) -> Result<Option<SettingsFile>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };
    match serde_json::from_str(&content) {
        Ok(settings) => Ok(Some(settings)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid settings file");
            Ok(Some(SettingsFile::default()))
        }
    }
}

/// Effective client settings
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_secs: u64,
    // BANKLINE_API_URL supplied the URL; save() keeps the stored one
    base_url_from_env: bool,
    loaded: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url_from_env: false,
            loaded: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load settings from `bankline_dir`, applying `BANKLINE_API_URL`
    pub fn load(bankline_dir: &Path) -> Result<Self> {
        let loaded = read_settings(&bankline_dir.join(SETTINGS_FILENAME))?.unwrap_or_default();

        let env_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty());
        let base_url_from_env = env_url.is_some();

        Ok(Self {
            api_base_url: env_url
                .or_else(|| loaded.api.base_url.clone())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            timeout_secs: match loaded.api.timeout_secs {
                Some(t) if t > 0 => t,
                _ => DEFAULT_TIMEOUT_SECS,
            },
            base_url_from_env,
            loaded,
        })
    }

    /// Write the managed keys back, keeping whatever else the file holds
    pub fn save(&self, bankline_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(bankline_dir)
            .with_context(|| format!("Failed to create {}", bankline_dir.display()))?;
        let path = bankline_dir.join(SETTINGS_FILENAME);

        let mut settings = read_settings(&path)?.unwrap_or_else(|| self.loaded.clone());
        if !self.base_url_from_env {
            settings.api.base_url = Some(self.api_base_url.clone());
        }
        settings.api.timeout_secs = Some(self.timeout_secs);

        let mut tmp = NamedTempFile::new_in(bankline_dir)?;
        serde_json::to_writer_pretty(&mut tmp, &settings)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Point the client at another backend
    pub fn set_api_base_url(&mut self, url: impl Into<String>) {
        self.api_base_url = url.into();
        self.base_url_from_env = false;
    }
}
