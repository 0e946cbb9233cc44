//! Error types for the settings store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, validating, or persisting settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The setting name is not one of the recognized names.
    #[error("`{name}` is not a valid setting name")]
    InvalidSettingName {
        /// The rejected name.
        name: String,
    },

    /// The format value is not one of `images`, `no_images`, `auto`.
    #[error("`{value}` is not a valid format, expected one of: images, no_images, auto")]
    InvalidFormatValue {
        /// The rejected value.
        value: String,
    },

    /// A value could not be parsed for the setting's type.
    #[error("invalid value `{value}` for `{name}`: {reason}")]
    InvalidSettingValue {
        /// Setting the value was meant for.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A setting required by the command has never been configured.
    #[error(
        "`{name}` is not configured\n  Suggestion: run `gutenberg2kindle set-config --name {name} --value <value>`"
    )]
    MissingSetting {
        /// The unset setting.
        name: &'static str,
    },

    /// Neither `XDG_CONFIG_HOME` nor `HOME` is available.
    #[error("could not resolve a configuration directory (set XDG_CONFIG_HOME or HOME)")]
    NoConfigDir,

    /// Reading or writing the settings file failed.
    #[error("IO error on settings file {path}: {source}")]
    Io {
        /// Settings file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON or has mistyped values.
    #[error("malformed settings file {path}: {source}")]
    Malformed {
        /// Settings file path.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Creates an invalid-setting-name error.
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidSettingName { name: name.into() }
    }

    /// Creates an invalid-format error.
    pub fn invalid_format(value: impl Into<String>) -> Self {
        Self::InvalidFormatValue {
            value: value.into(),
        }
    }

    /// Creates an invalid-value error for a typed setting.
    pub fn invalid_value(
        name: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidSettingValue {
            name,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
