//! File-backed settings store.
//!
//! Settings live in a small JSON document. Opening the store seeds any
//! recognized setting missing from the file with its default and writes the
//! file back only when something was seeded, so repeated opens are idempotent.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::error::ConfigError;
use super::settings::{SettingName, SettingValue, Settings};

/// Directory name under the user's config home.
pub const APP_DIR_NAME: &str = "gutenberg2kindle";

/// Settings file name.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Resolves the default settings path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/gutenberg2kindle/settings.json`
/// 2. `$HOME/.config/gutenberg2kindle/settings.json`
#[must_use]
pub fn resolve_default_settings_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join(APP_DIR_NAME)
                .join(SETTINGS_FILE_NAME),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(APP_DIR_NAME)
            .join(SETTINGS_FILE_NAME),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Settings bound to the file they were loaded from.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Opens the store at the default location, seeding defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] when no location can be resolved,
    /// or any error from [`SettingsStore::open`].
    pub fn open_default() -> Result<Self, ConfigError> {
        let path = resolve_default_settings_path().ok_or(ConfigError::NoConfigDir)?;
        Self::open(path)
    }

    /// Opens the store at `path`, seeding every absent setting with its default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read or written and
    /// [`ConfigError::Malformed`] when it is not a JSON object with the
    /// expected value types.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let mut document = read_document(&path)?;

        let mut seeded = Vec::new();
        let defaults = Settings::default();
        for name in SettingName::ALL {
            if !document.contains_key(name.as_str()) {
                document.insert(name.as_str().to_string(), default_json(&defaults, name));
                seeded.push(name.as_str());
            }
        }
        for key in document.keys() {
            if key.parse::<SettingName>().is_err() {
                warn!(key = %key, path = %path.display(), "Ignoring unknown key in settings file");
            }
        }

        let settings: Settings = serde_json::from_value(Value::Object(document))
            .map_err(|source| ConfigError::Malformed {
                path: path.clone(),
                source,
            })?;

        let store = Self { path, settings };
        if !seeded.is_empty() {
            debug!(?seeded, "Seeding default settings");
            store.save()?;
            info!(path = %store.path.display(), "Settings initialized");
        }
        Ok(store)
    }

    /// Path of the backing settings file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the value of a single setting.
    #[must_use]
    pub fn get(&self, name: SettingName) -> SettingValue {
        self.settings.get(name)
    }

    /// Returns every setting, in display order.
    #[must_use]
    pub fn all(&self) -> Vec<(SettingName, SettingValue)> {
        self.settings.all()
    }

    /// Looks a setting up by its string key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSettingName`] for unknown keys.
    pub fn get_named(&self, name: &str) -> Result<SettingValue, ConfigError> {
        Ok(self.get(name.parse()?))
    }

    /// Validates and stores a value in memory. Call [`save`](Self::save) to persist.
    ///
    /// # Errors
    ///
    /// See [`Settings::set`].
    pub fn set(&mut self, name: SettingName, raw: &str) -> Result<SettingValue, ConfigError> {
        let value = self.settings.set(name, raw)?;
        debug!(setting = %name, value = %value, "Setting updated");
        Ok(value)
    }

    /// Sets a value by its string key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSettingName`] for unknown keys, otherwise
    /// see [`Settings::set`].
    pub fn set_named(&mut self, name: &str, raw: &str) -> Result<SettingValue, ConfigError> {
        self.set(name.parse()?, raw)
    }

    /// Writes the settings document, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the directory or file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::io(parent, source))?;
        }
        let mut raw = serde_json::to_string_pretty(&self.settings).map_err(|source| {
            ConfigError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        raw.push('\n');
        fs::write(&self.path, raw).map_err(|source| ConfigError::io(&self.path, source))?;
        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::io(path, source))?;
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::Malformed {
            path: path.to_path_buf(),
            source: serde::de::Error::custom(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            )),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn default_json(defaults: &Settings, name: SettingName) -> Value {
    match defaults.get(name) {
        SettingValue::Text(text) => Value::String(text),
        SettingValue::Integer(value) => Value::from(value),
    }
}
