//! Configuration management
//!
//! Settings live in `settings.json` in the bankline directory:
//! ```json
//! {
//!   "api": { "baseUrl": "http://localhost:5230" }
//! }
//! ```
//! The backend base address is the single configurable value; everything
//! else in the file is preserved untouched when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default backend base address (the local development server).
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5230";

/// Environment variable to override the backend base address.
/// Set this to point at a staging backend for testing.
pub const BANKLINE_API_URL_ENV: &str = "BANKLINE_API_URL";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            other: HashMap::new(),
        }
    }
}

/// Bankline configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the bankline directory
    ///
    /// The base URL can come from:
    /// 1. Environment variable BANKLINE_API_URL (wins, for CI/testing)
    /// 2. Settings file
    /// 3. Built-in default
    pub fn load(bankline_dir: &Path) -> Result<Self> {
        let settings_path = bankline_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let api_base_url = match std::env::var(BANKLINE_API_URL_ENV) {
            Ok(url) if !url.is_empty() => url,
            _ => raw.api.base_url.clone(),
        };

        Ok(Self {
            api_base_url,
            _raw_settings: raw,
        })
    }

    /// Save config to the bankline directory
    /// Preserves other settings that the CLI doesn't manage
    pub fn save(&self, bankline_dir: &Path) -> Result<()> {
        let settings_path = bankline_dir.join("settings.json");

        // Load existing settings to preserve fields we don't manage
        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        // Update only the fields we manage
        settings.api.base_url = self.api_base_url.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    pub fn set_api_base_url(&mut self, url: impl Into<String>) {
        self.api_base_url = url.into();
    }
}
