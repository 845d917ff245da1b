mod cli;
mod compose;
mod paths;
mod run;

use std::time::Instant;

use anyhow::{bail, Context, Result};
use cli::{Command, ContactAction, ContactCommand, ContentArgs, ThemeAction, ThemeCommand};
use relay::{ContactForm, FormStatus, RelayClient, RelayConfig, RelayError};
use siteconfig::{SiteConfig, ThemeState, ThemeSwitcher};

use paths::AppPaths;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    match cli.command {
        Some(Command::Contact(contact)) => handle_contact(contact, cli.run.config),
        Some(Command::Theme(theme)) => handle_theme(theme),
        Some(Command::Content(args)) => handle_content(args),
        Some(Command::Paths) => handle_paths(),
        None => run::run(cli.run),
    }
}

fn handle_contact(
    command: ContactCommand,
    config_override: Option<std::path::PathBuf>,
) -> Result<()> {
    let ContactAction::Send(args) = command.action;

    let paths = AppPaths::discover()?;
    let config_path = config_override.unwrap_or_else(|| paths.config_file());
    let config = SiteConfig::load_or_default(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;

    let relay_config = match RelayConfig::from_parts(
        args.service_id.or(config.contact.service_id),
        args.template_id.or(config.contact.template_id),
        args.public_key.or(config.contact.public_key),
    ) {
        Ok(relay_config) => relay_config,
        // A setup problem, not a network one; say so explicitly.
        Err(err @ RelayError::Config(_)) => bail!("{err}"),
        Err(err) => return Err(err).context("building relay configuration"),
    };
    let client = RelayClient::new(relay_config).context("constructing relay client")?;

    let mut form = ContactForm::new(config.contact.status_dismiss);
    form.name = args.name;
    form.email = args.email;
    form.subject = args.subject;
    form.message = args.message;
    form.reply_to = config.contact.reply_to;

    match form.submit(&client, Instant::now()) {
        FormStatus::Success => {
            println!("Message sent.");
            Ok(())
        }
        FormStatus::Error(message) => bail!("{message}"),
        status => bail!("unexpected submission state: {status:?}"),
    }
}

fn handle_theme(command: ThemeCommand) -> Result<()> {
    let paths = AppPaths::discover()?;
    let state_path = paths.theme_state_file();
    let state = ThemeState::load_or_default(&state_path)
        .with_context(|| format!("loading theme state from {}", state_path.display()))?;

    match command.action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => {
            println!("{}", state.theme);
        }
        ThemeAction::Toggle => {
            let mut switcher = ThemeSwitcher::new(state.theme);
            if let Some(next) = switcher.begin_toggle() {
                ThemeState { theme: next }
                    .persist(&state_path)
                    .with_context(|| format!("persisting theme to {}", state_path.display()))?;
                switcher.complete_toggle();
                println!("{next}");
            }
        }
    }
    Ok(())
}

fn handle_content(args: ContentArgs) -> Result<()> {
    if args.json {
        let tables = serde_json::json!({
            "profile": content::profile(),
            "experience": content::experiences(),
            "education": content::education(),
            "certificates": content::certificates(),
            "projects": content::projects(),
        });
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    let profile = content::profile();
    println!("{} - {}", profile.name, profile.tagline);
    println!("{} | {}", profile.location, profile.email);
    println!();
    println!("Experience:");
    for entry in content::experiences() {
        println!("  {:<28} {:<18} {}", entry.role, entry.company, entry.period);
    }
    println!("Education:");
    for entry in content::education() {
        println!("  {:<28} {:<18} {}", entry.degree, entry.school, entry.period);
    }
    println!("Certificates:");
    for entry in content::certificates() {
        println!("  {:<40} {:<22} {}", entry.title, entry.issuer, entry.year);
    }
    println!("Projects:");
    for entry in content::projects() {
        println!("  {:<12} {:<40} [{}]", entry.name, entry.description, entry.stack);
    }
    Ok(())
}

fn handle_paths() -> Result<()> {
    let paths = AppPaths::discover()?;
    println!("Configuration directories:");
    println!("  config:  {}", paths.config_dir().display());
    println!("  file:    {}", paths.config_file().display());
    println!("  theme:   {}", paths.theme_state_file().display());
    Ok(())
}
