//! Settings store: typed names and values, validation, and persistence.
//!
//! # Example
//!
//! ```no_run
//! use gutenberg2kindle_core::config::{SettingName, SettingsStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SettingsStore::open_default()?;
//! store.set(SettingName::Format, "no_images")?;
//! store.save()?;
//! println!("{}", store.get(SettingName::Format));
//! # Ok(())
//! # }
//! ```

mod error;
mod interactive;
mod settings;
mod store;

pub use error::ConfigError;
pub use interactive::prompt_settings;
pub use settings::{
    DEFAULT_SMTP_PORT, DEFAULT_SMTP_SERVER, FormatPreference, MailSettings, SettingName,
    SettingValue, Settings,
};
pub use store::{APP_DIR_NAME, SETTINGS_FILE_NAME, SettingsStore, resolve_default_settings_path};
