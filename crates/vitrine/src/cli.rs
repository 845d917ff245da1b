use std::path::PathBuf;

use clap::{Parser, Subcommand};
use siteconfig::ThemeName;

#[derive(Parser, Debug)]
#[command(
    name = "vitrine",
    author,
    version,
    about = "Animated portfolio deck",
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Override the window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Frame-rate cap for the animation loop (0 = uncapped).
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Theme for this run, overriding the persisted choice.
    #[arg(long, value_name = "THEME", value_parser = parse_theme)]
    pub theme: Option<ThemeName>,

    /// Path to the site configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for dot phases and shuffle order.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Keep the hero card on its first section instead of rotating.
    #[arg(long)]
    pub no_rotate: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a contact message through the configured email relay.
    Contact(ContactCommand),
    /// Show or toggle the persisted theme.
    Theme(ThemeCommand),
    /// Print the portfolio tables.
    Content(ContentArgs),
    /// Print resolved configuration and state paths.
    Paths,
}

#[derive(Parser, Debug)]
pub struct ContactCommand {
    #[command(subcommand)]
    pub action: ContactAction,
}

#[derive(Subcommand, Debug)]
pub enum ContactAction {
    /// Validate and send a message.
    Send(SendArgs),
}

#[derive(Parser, Debug)]
pub struct SendArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub message: String,

    /// Relay service identifier; falls back to the config file.
    #[arg(long, env = "VITRINE_SERVICE_ID")]
    pub service_id: Option<String>,

    /// Relay template identifier; falls back to the config file.
    #[arg(long, env = "VITRINE_TEMPLATE_ID")]
    pub template_id: Option<String>,

    /// Relay public key; falls back to the config file.
    #[arg(long, env = "VITRINE_PUBLIC_KEY")]
    pub public_key: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ThemeCommand {
    #[command(subcommand)]
    pub action: Option<ThemeAction>,
}

#[derive(Subcommand, Debug)]
pub enum ThemeAction {
    /// Print the persisted theme (the default action).
    Show,
    /// Switch between light and dark and persist the result.
    Toggle,
}

#[derive(Parser, Debug)]
pub struct ContentArgs {
    /// Emit the tables as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_theme(value: &str) -> Result<ThemeName, String> {
    value.parse()
}

pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid width".to_string())?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid height".to_string())?;
    if width == 0 || height == 0 {
        return Err("window dimensions must be greater than zero".into());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_variants() {
        assert_eq!(parse_size("1280x720").unwrap(), (1280, 720));
        assert_eq!(parse_size("1920X1080").unwrap(), (1920, 1080));
        assert!(parse_size("1280").is_err());
        assert!(parse_size("0x720").is_err());
    }

    #[test]
    fn parses_theme_names() {
        assert_eq!(parse_theme("light").unwrap(), ThemeName::Light);
        assert_eq!(parse_theme("Dark").unwrap(), ThemeName::Dark);
        assert!(parse_theme("mauve").is_err());
    }

    #[test]
    fn contact_send_requires_all_fields() {
        let cli = Cli::try_parse_from([
            "vitrine", "contact", "send", "--name", "Ada", "--email", "ada@example.com",
            "--subject", "Hi", "--message", "Hello there",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Contact(ContactCommand {
                action: ContactAction::Send(args),
            })) => {
                assert_eq!(args.name, "Ada");
                assert_eq!(args.service_id, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["vitrine", "contact", "send", "--name", "Ada"]).is_err());
    }

    #[test]
    fn bare_invocation_runs_the_deck() {
        let cli = Cli::try_parse_from(["vitrine", "--size", "640x480", "--fps", "30"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.size, Some((640, 480)));
        assert_eq!(cli.run.fps, Some(30.0));
    }
}
