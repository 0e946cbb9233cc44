//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand};

use gutenberg2kindle_core::{BookId, SettingName};

/// A CLI tool to download and send ebooks from Project Gutenberg to a Kindle
/// email address via SMTP.
#[derive(Parser, Debug)]
#[command(name = "gutenberg2kindle")]
#[command(author, version, about)]
#[command(after_help = "Happy reading! :-)")]
pub struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download books and send them to the configured Kindle address
    Send(SendArgs),
    /// Print one setting, or every setting
    GetConfig(GetConfigArgs),
    /// Store a setting
    SetConfig(SetConfigArgs),
    /// Walk through every setting interactively
    InteractiveConfig,
    /// Print the tool's version
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct SendArgs {
    /// Project Gutenberg book ids, processed in order
    #[arg(short = 'b', long = "book-id", required = true, num_args = 1..)]
    pub book_ids: Vec<BookId>,

    /// Skip books that cannot be downloaded instead of stopping
    #[arg(long)]
    pub ignore_errors: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GetConfigArgs {
    /// Setting name: smtp_server, smtp_port, sender_email, kindle_email, format
    #[arg(short, long)]
    pub name: Option<SettingName>,
}

#[derive(Args, Debug, Clone)]
pub struct SetConfigArgs {
    /// Setting name: smtp_server, smtp_port, sender_email, kindle_email, format
    #[arg(short, long)]
    pub name: Option<SettingName>,

    /// New value (format accepts images, no_images, auto)
    #[arg(short = 'a', long)]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_ids(args: &SendArgs) -> Vec<u32> {
        args.book_ids.iter().map(|id| id.get()).collect()
    }

    #[test]
    fn test_cli_send_accepts_multiple_ids_in_order() {
        let cli = Cli::try_parse_from([
            "gutenberg2kindle",
            "send",
            "--book-id",
            "1234",
            "5678",
            "1234",
        ])
        .unwrap();
        let Command::Send(args) = cli.command else {
            panic!("expected send command");
        };
        assert_eq!(book_ids(&args), [1234, 5678, 1234]);
        assert!(!args.ignore_errors);
    }

    #[test]
    fn test_cli_send_repeated_short_flag_and_ignore_errors() {
        let cli = Cli::try_parse_from([
            "gutenberg2kindle",
            "send",
            "--ignore-errors",
            "-b",
            "1",
            "-b",
            "2",
        ])
        .unwrap();
        let Command::Send(args) = cli.command else {
            panic!("expected send command");
        };
        assert_eq!(book_ids(&args), [1, 2]);
        assert!(args.ignore_errors);
    }

    #[test]
    fn test_cli_send_requires_book_id() {
        let err = Cli::try_parse_from(["gutenberg2kindle", "send"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_send_rejects_zero_and_text_ids() {
        for bad in ["0", "abc"] {
            let err = Cli::try_parse_from(["gutenberg2kindle", "send", "-b", bad]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn test_cli_get_config_name_is_optional() {
        let cli = Cli::try_parse_from(["gutenberg2kindle", "get-config"]).unwrap();
        assert!(matches!(cli.command, Command::GetConfig(GetConfigArgs { name: None })));

        let cli =
            Cli::try_parse_from(["gutenberg2kindle", "get-config", "-n", "smtp_port"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::GetConfig(GetConfigArgs {
                name: Some(SettingName::SmtpPort)
            })
        ));
    }

    #[test]
    fn test_cli_unknown_setting_name_rejected() {
        let err = Cli::try_parse_from(["gutenberg2kindle", "get-config", "--name", "pokemon"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("`pokemon` is not a valid setting name"));
    }

    #[test]
    fn test_cli_set_config_flags_are_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["gutenberg2kindle", "set-config"]).unwrap();
        let Command::SetConfig(args) = cli.command else {
            panic!("expected set-config command");
        };
        assert!(args.name.is_none());
        assert!(args.value.is_none());

        let cli = Cli::try_parse_from([
            "gutenberg2kindle",
            "set-config",
            "-n",
            "format",
            "-a",
            "auto",
        ])
        .unwrap();
        let Command::SetConfig(args) = cli.command else {
            panic!("expected set-config command");
        };
        assert_eq!(args.name, Some(SettingName::Format));
        assert_eq!(args.value.as_deref(), Some("auto"));
    }

    #[test]
    fn test_cli_global_verbosity_after_subcommand() {
        let cli = Cli::try_parse_from(["gutenberg2kindle", "version", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn test_cli_requires_a_command() {
        let result = Cli::try_parse_from(["gutenberg2kindle"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_help_mentions_purpose_and_epilog() {
        let err = Cli::try_parse_from(["gutenberg2kindle", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        let help = err.to_string();
        assert!(help.contains("A CLI tool"));
        assert!(help.contains("Happy reading! :-)"));
    }
}
