//! Config command handlers: read, write and interactively edit settings.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use gutenberg2kindle_core::{SettingName, SettingValue, SettingsStore, prompt_settings};
use tracing::info;

use crate::ProcessExit;
use crate::cli::{GetConfigArgs, SetConfigArgs};

pub(crate) fn format_setting(name: SettingName, value: &SettingValue) -> String {
    format!("{name}:\t\t{value}")
}

fn open_store() -> Result<SettingsStore> {
    SettingsStore::open_default().context("failed to open settings")
}

pub(crate) fn run_get_config_command<W: Write>(
    args: &GetConfigArgs,
    out: &mut W,
) -> Result<ProcessExit> {
    let store = open_store()?;
    print_settings(&store, args.name, out)?;
    Ok(ProcessExit::Success)
}

pub(crate) fn run_set_config_command<W: Write>(
    args: &SetConfigArgs,
    out: &mut W,
) -> Result<ProcessExit> {
    let Some(name) = args.name else {
        writeln!(out, "Please specify a setting name with the `--name` flag")?;
        return Ok(ProcessExit::Failure);
    };
    let Some(value) = args.value.as_deref() else {
        writeln!(out, "Please specify a setting value with the `--value` flag")?;
        return Ok(ProcessExit::Failure);
    };

    let mut store = open_store()?;
    set_and_save(&mut store, name, value, out)?;
    Ok(ProcessExit::Success)
}

pub(crate) fn run_interactive_config_command<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<ProcessExit> {
    let mut store = open_store()?;
    edit_interactively(&mut store, input, out)?;
    Ok(ProcessExit::Success)
}

fn print_settings<W: Write>(
    store: &SettingsStore,
    name: Option<SettingName>,
    out: &mut W,
) -> Result<()> {
    match name {
        Some(name) => writeln!(out, "{}", store.get(name))?,
        None => {
            for (name, value) in store.all() {
                writeln!(out, "{}", format_setting(name, &value))?;
            }
        }
    }
    Ok(())
}

fn set_and_save<W: Write>(
    store: &mut SettingsStore,
    name: SettingName,
    raw: &str,
    out: &mut W,
) -> Result<()> {
    let value = store.set(name, raw)?;
    store
        .save()
        .with_context(|| format!("failed to save setting `{name}`"))?;
    writeln!(out, "{}", format_setting(name, &value))?;
    Ok(())
}

fn edit_interactively<R: BufRead, W: Write>(
    store: &mut SettingsStore,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let changed = prompt_settings(store, input, out).context("failed to read settings")?;
    if changed > 0 {
        store.save().context("failed to save settings")?;
    }
    info!(changed, path = %store.path().display(), "Interactive configuration finished");

    writeln!(out)?;
    print_settings(store, None, out)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;

    fn open(temp: &TempDir) -> SettingsStore {
        SettingsStore::open(temp.path().join("settings.json")).unwrap()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>),
    {
        let mut out = Vec::new();
        f(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_setting_uses_double_tab() {
        let value = SettingValue::Integer(587);
        assert_eq!(format_setting(SettingName::SmtpPort, &value), "smtp_port:\t\t587");
    }

    #[test]
    fn test_print_all_settings_in_order() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp);

        let out = render(|out| print_settings(&store, None, out).unwrap());
        assert_eq!(
            out,
            "smtp_server:\t\tsmtp.gmail.com\n\
             smtp_port:\t\t587\n\
             sender_email:\t\t\n\
             kindle_email:\t\t\n\
             format:\t\tauto\n"
        );
    }

    #[test]
    fn test_print_single_setting_prints_bare_value() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp);

        let out =
            render(|out| print_settings(&store, Some(SettingName::SmtpServer), out).unwrap());
        assert_eq!(out, "smtp.gmail.com\n");
    }

    #[test]
    fn test_set_and_save_echoes_and_persists() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);

        let out = render(|out| {
            set_and_save(&mut store, SettingName::KindleEmail, "reader@kindle.com", out).unwrap();
        });
        assert_eq!(out, "kindle_email:\t\treader@kindle.com\n");

        let reopened = open(&temp);
        assert_eq!(
            reopened.get(SettingName::KindleEmail).to_string(),
            "reader@kindle.com"
        );
    }

    #[test]
    fn test_set_and_save_rejects_invalid_value_without_saving() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);

        let mut out = Vec::new();
        let err = set_and_save(&mut store, SettingName::SmtpPort, "abc", &mut out).unwrap_err();
        assert!(out.is_empty());
        assert!(err.to_string().contains("smtp_port"), "{err}");
        assert_eq!(open(&temp).get(SettingName::SmtpPort), SettingValue::Integer(587));
    }

    #[test]
    fn test_edit_interactively_saves_changes_and_prints_summary() {
        let temp = TempDir::new().unwrap();
        let mut store = open(&temp);
        let mut input = Cursor::new("\n2525\n\nreader@kindle.com\nno_images\n");

        let out = render(|out| edit_interactively(&mut store, &mut input, out).unwrap());
        assert!(out.ends_with(
            "smtp_server:\t\tsmtp.gmail.com\n\
             smtp_port:\t\t2525\n\
             sender_email:\t\t\n\
             kindle_email:\t\treader@kindle.com\n\
             format:\t\tno_images\n"
        ));

        let reopened = open(&temp);
        assert_eq!(reopened.get(SettingName::SmtpPort), SettingValue::Integer(2525));
        assert_eq!(reopened.get(SettingName::Format).to_string(), "no_images");
    }

    #[test]
    fn test_missing_flags_fail_before_touching_settings() {
        let args = SetConfigArgs {
            name: None,
            value: Some("x".to_string()),
        };
        let mut out = Vec::new();
        let exit = run_set_config_command(&args, &mut out).unwrap();
        assert_eq!(exit, ProcessExit::Failure);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Please specify a setting name with the `--name` flag\n"
        );

        let args = SetConfigArgs {
            name: Some(SettingName::Format),
            value: None,
        };
        let mut out = Vec::new();
        let exit = run_set_config_command(&args, &mut out).unwrap();
        assert_eq!(exit, ProcessExit::Failure);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Please specify a setting value with the `--value` flag\n"
        );
    }
}
