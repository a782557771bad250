//! Configuration management

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

use crate::auth::firebase::{DEFAULT_AUTH_URL, DEFAULT_TOKEN_URL};
use crate::store::firestore::DEFAULT_FIRESTORE_URL;

/// Application directory name under the platform config/data roots
const APP_DIR_NAME: &str = "fitz";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub firebase: FirebaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Deserialize)]
pub struct FirebaseConfig {
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_firestore_url")]
    pub firestore_url: String,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            project_id: None,
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            firestore_url: default_firestore_url(),
        }
    }
}

impl FirebaseConfig {
    /// API key, if set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_firestore_url() -> String {
    DEFAULT_FIRESTORE_URL.to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthConfig {
    /// Keep the signed-in session across launches
    #[serde(default)]
    pub persist_session: bool,
}

/// Where screen data comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// Built-in sample data after a simulated delay
    #[default]
    Placeholder,
    /// `users/{uid}/...` collections in the document store
    Remote,
}

#[derive(Debug, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub source: DataSourceKind,
    #[serde(default = "default_placeholder_delay_ms")]
    pub placeholder_delay_ms: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DataSourceKind::default(),
            placeholder_delay_ms: default_placeholder_delay_ms(),
        }
    }
}

fn default_placeholder_delay_ms() -> u64 {
    1500
}

/// Get config directory (XDG_CONFIG_HOME or platform default)
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FITZ_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join("Library/Application Support/fitz");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR_NAME);
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR_NAME);
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR_NAME);
        }
    }

    // Fallback to current directory
    PathBuf::from(".")
}

/// Get data directory (XDG_DATA_HOME or platform default)
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FITZ_DATA_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join("Library/Application Support/fitz");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join(APP_DIR_NAME);
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".local/share").join(APP_DIR_NAME);
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("LOCALAPPDATA") {
            return PathBuf::from(appdata).join(APP_DIR_NAME);
        }
    }

    // Fallback to ./data
    PathBuf::from("./data")
}

pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir();

    let mut builder = ::config::Config::builder()
        // Start with defaults
        .set_default("data.source", "placeholder")?
        .set_default("data.placeholder_delay_ms", 1500)?
        .set_default("auth.persist_session", false)?
        // Load from config file if it exists (config.toml, config.json, ...)
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        )
        // Override with environment variables (FITZ_DATA__SOURCE, FITZ_FIREBASE__API_KEY, etc.)
        .add_source(
            ::config::Environment::with_prefix("FITZ")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    // Firebase's own variable names win over everything else
    if let Ok(key) = std::env::var("FIREBASE_API_KEY") {
        if !key.trim().is_empty() {
            builder = builder.set_override("firebase.api_key", key)?;
        }
    }
    if let Ok(project) = std::env::var("FIREBASE_PROJECT_ID") {
        if !project.trim().is_empty() {
            builder = builder.set_override("firebase.project_id", project)?;
        }
    }

    let config = builder.build()?;

    Ok(config.try_deserialize()?)
}
