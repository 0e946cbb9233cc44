//! Typed setting names, values, and the persisted settings document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Default SMTP server.
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";

/// Default SMTP submission port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Recognized setting names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingName {
    SmtpServer,
    SmtpPort,
    SenderEmail,
    KindleEmail,
    Format,
}

impl SettingName {
    /// Every setting, in display order.
    pub const ALL: [Self; 5] = [
        Self::SmtpServer,
        Self::SmtpPort,
        Self::SenderEmail,
        Self::KindleEmail,
        Self::Format,
    ];

    /// Returns the persisted key for this setting.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SmtpServer => "smtp_server",
            Self::SmtpPort => "smtp_port",
            Self::SenderEmail => "sender_email",
            Self::KindleEmail => "kindle_email",
            Self::Format => "format",
        }
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ConfigError::invalid_name(s))
    }
}

/// A setting value: strings for everything but the port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Text(String),
    Integer(u16),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

/// Which Kindle file variant to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatPreference {
    /// Only the variant with images.
    Images,
    /// Only the variant without images.
    NoImages,
    /// Images first, falling back to no images.
    #[default]
    Auto,
}

impl FormatPreference {
    /// Returns the persisted label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::NoImages => "no_images",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for FormatPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatPreference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "images" => Ok(Self::Images),
            "no_images" => Ok(Self::NoImages),
            "auto" => Ok(Self::Auto),
            other => Err(ConfigError::invalid_format(other)),
        }
    }
}

/// SMTP connection and addressing details needed to send a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub sender_email: String,
    pub kindle_email: String,
}

/// The persisted settings document.
///
/// `format` is kept as the raw stored string; [`Settings::format_preference`]
/// validates it at the point of use so hand-edited files fail loudly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub sender_email: String,
    pub kindle_email: String,
    pub format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            smtp_server: DEFAULT_SMTP_SERVER.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            sender_email: String::new(),
            kindle_email: String::new(),
            format: FormatPreference::default().as_str().to_string(),
        }
    }
}

impl Settings {
    /// Returns the current value of a setting.
    #[must_use]
    pub fn get(&self, name: SettingName) -> SettingValue {
        match name {
            SettingName::SmtpServer => SettingValue::Text(self.smtp_server.clone()),
            SettingName::SmtpPort => SettingValue::Integer(self.smtp_port),
            SettingName::SenderEmail => SettingValue::Text(self.sender_email.clone()),
            SettingName::KindleEmail => SettingValue::Text(self.kindle_email.clone()),
            SettingName::Format => SettingValue::Text(self.format.clone()),
        }
    }

    /// Returns every setting with its value, in display order.
    #[must_use]
    pub fn all(&self) -> Vec<(SettingName, SettingValue)> {
        SettingName::ALL
            .into_iter()
            .map(|name| (name, self.get(name)))
            .collect()
    }

    /// Validates `raw` for the setting's type and stores it.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidFormatValue`] for an unknown format.
    /// - [`ConfigError::InvalidSettingValue`] for a bad port, address, or
    ///   empty server.
    pub fn set(&mut self, name: SettingName, raw: &str) -> Result<SettingValue, ConfigError> {
        let raw = raw.trim();
        match name {
            SettingName::SmtpServer => {
                if raw.is_empty() {
                    return Err(ConfigError::invalid_value(
                        name.as_str(),
                        raw,
                        "server must not be empty",
                    ));
                }
                self.smtp_server = raw.to_string();
            }
            SettingName::SmtpPort => {
                self.smtp_port = parse_port(raw)?;
            }
            SettingName::SenderEmail => {
                self.sender_email = parse_address(name, raw)?;
            }
            SettingName::KindleEmail => {
                self.kindle_email = parse_address(name, raw)?;
            }
            SettingName::Format => {
                self.format = raw.parse::<FormatPreference>()?.as_str().to_string();
            }
        }
        Ok(self.get(name))
    }

    /// Parses the stored format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFormatValue`] naming the stored value
    /// when it is not a recognized format.
    pub fn format_preference(&self) -> Result<FormatPreference, ConfigError> {
        self.format.parse()
    }

    /// Returns the SMTP details, requiring both addresses to be configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSetting`] for an empty address.
    pub fn mail_settings(&self) -> Result<MailSettings, ConfigError> {
        if self.sender_email.is_empty() {
            return Err(ConfigError::MissingSetting {
                name: SettingName::SenderEmail.as_str(),
            });
        }
        if self.kindle_email.is_empty() {
            return Err(ConfigError::MissingSetting {
                name: SettingName::KindleEmail.as_str(),
            });
        }
        Ok(MailSettings {
            smtp_server: self.smtp_server.clone(),
            smtp_port: self.smtp_port,
            sender_email: self.sender_email.clone(),
            kindle_email: self.kindle_email.clone(),
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let name = SettingName::SmtpPort.as_str();
    let port = raw
        .parse::<u16>()
        .map_err(|error| ConfigError::invalid_value(name, raw, error.to_string()))?;
    if port == 0 {
        return Err(ConfigError::invalid_value(
            name,
            raw,
            "expected range: 1..=65535",
        ));
    }
    Ok(port)
}

fn parse_address(name: SettingName, raw: &str) -> Result<String, ConfigError> {
    raw.parse::<lettre::Address>()
        .map(|address| address.to_string())
        .map_err(|error| ConfigError::invalid_value(name.as_str(), raw, error.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_name_parses_every_recognized_key() {
        for name in SettingName::ALL {
            assert_eq!(name.as_str().parse::<SettingName>().unwrap(), name);
        }
    }

    #[test]
    fn test_setting_name_rejects_unknown_key() {
        let err = "pokemon".parse::<SettingName>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSettingName { ref name } if name == "pokemon"));
    }

    #[test]
    fn test_format_preference_parses_labels() {
        assert_eq!("images".parse::<FormatPreference>().unwrap(), FormatPreference::Images);
        assert_eq!(
            "no_images".parse::<FormatPreference>().unwrap(),
            FormatPreference::NoImages
        );
        assert_eq!("auto".parse::<FormatPreference>().unwrap(), FormatPreference::Auto);
        assert!(matches!(
            "noimages".parse::<FormatPreference>(),
            Err(ConfigError::InvalidFormatValue { .. })
        ));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.smtp_server, "smtp.gmail.com");
        assert_eq!(settings.smtp_port, 587);
        assert!(settings.sender_email.is_empty());
        assert!(settings.kindle_email.is_empty());
        assert_eq!(settings.format_preference().unwrap(), FormatPreference::Auto);
    }

    #[test]
    fn test_set_then_get_round_trips_every_setting() {
        let mut settings = Settings::default();
        let cases = [
            (SettingName::SmtpServer, "mail.example.org"),
            (SettingName::SmtpPort, "465"),
            (SettingName::SenderEmail, "sender@example.com"),
            (SettingName::KindleEmail, "reader@kindle.com"),
            (SettingName::Format, "no_images"),
        ];
        for (name, raw) in cases {
            let stored = settings.set(name, raw).unwrap();
            assert_eq!(stored.to_string(), raw);
            assert_eq!(settings.get(name).to_string(), raw, "round trip for {name}");
        }
        assert_eq!(settings.get(SettingName::SmtpPort), SettingValue::Integer(465));
    }

    #[test]
    fn test_set_format_rejects_unknown_value_and_keeps_old() {
        let mut settings = Settings::default();
        let err = settings.set(SettingName::Format, "pdf").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormatValue { ref value } if value == "pdf"));
        assert_eq!(settings.format, "auto");
    }

    #[test]
    fn test_set_port_rejects_non_integer_and_zero() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set(SettingName::SmtpPort, "abc"),
            Err(ConfigError::InvalidSettingValue { name: "smtp_port", .. })
        ));
        assert!(settings.set(SettingName::SmtpPort, "0").is_err());
        assert!(settings.set(SettingName::SmtpPort, "70000").is_err());
        assert_eq!(settings.smtp_port, 587);
    }

    #[test]
    fn test_set_address_rejects_garbage() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set(SettingName::KindleEmail, "not an address"),
            Err(ConfigError::InvalidSettingValue { name: "kindle_email", .. })
        ));
    }

    #[test]
    fn test_set_server_rejects_blank() {
        let mut settings = Settings::default();
        assert!(settings.set(SettingName::SmtpServer, "   ").is_err());
        assert_eq!(settings.smtp_server, "smtp.gmail.com");
    }

    #[test]
    fn test_all_lists_settings_in_order() {
        let names: Vec<&str> = Settings::default()
            .all()
            .into_iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(
            names,
            ["smtp_server", "smtp_port", "sender_email", "kindle_email", "format"]
        );
    }

    #[test]
    fn test_format_preference_reports_stored_bad_value() {
        let settings = Settings {
            format: "epub".to_string(),
            ..Settings::default()
        };
        let err = settings.format_preference().unwrap_err();
        assert!(err.to_string().contains("`epub`"));
    }

    #[test]
    fn test_mail_settings_requires_addresses() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.mail_settings(),
            Err(ConfigError::MissingSetting { name: "sender_email" })
        ));
        settings.set(SettingName::SenderEmail, "me@example.com").unwrap();
        assert!(matches!(
            settings.mail_settings(),
            Err(ConfigError::MissingSetting { name: "kindle_email" })
        ));
        settings.set(SettingName::KindleEmail, "me@kindle.com").unwrap();
        let mail = settings.mail_settings().unwrap();
        assert_eq!(mail.smtp_server, "smtp.gmail.com");
        assert_eq!(mail.kindle_email, "me@kindle.com");
    }
}
