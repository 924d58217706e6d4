//! Site command line
//!
//! Runs the site's page behaviors outside a browser.
//!
//! # Usage
//!
//! ```bash
//! site validate --kind email "a@b.com"
//! site contact --name Alice --email a@b.com --message "Bonjour"
//! site dark-mode toggle
//! site format-date 2024-03-05
//! ```

mod commands;
mod config;
mod paths;

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use config::CliConfig;

#[derive(Parser)]
#[command(name = "site")]
#[command(version)]
#[command(about = "AZI GROUP site behaviors from the command line", long_about = None)]
struct Cli {
    /// Site base URL the contact endpoint is resolved against
    #[arg(long, env = "SITE_BASE_URL")]
    base_url: Option<String>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, short, env = "SITE_CONFIG")]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single value the way the site's forms do
    Validate {
        /// Declared field type
        #[arg(long, short, value_enum, default_value = "text")]
        kind: KindArg,
        /// Treat the field as required
        #[arg(long, short)]
        required: bool,
        value: String,
    },
    /// Submit the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        /// Extra form fields as NAME=VALUE
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Show or flip the stored dark-mode preference
    DarkMode {
        #[arg(value_enum, default_value = "status")]
        action: DarkModeAction,
    },
    /// Render a date the way the site displays it
    FormatDate { date: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Text,
    Email,
    Tel,
    Other,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DarkModeAction {
    Status,
    Toggle,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))
}

fn init_logging(verbose: bool) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("warning: logging disabled: {e}");
            }
        }
        Err(e) => eprintln!("warning: cannot create {}: {e}", path.display()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!("site {} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Validate {
            kind,
            required,
            value,
        } => commands::validate(&config, kind.into(), required, &value),
        Commands::Contact {
            name,
            email,
            message,
            phone,
            subject,
            fields,
        } => {
            let mut form = vec![
                ("name".to_string(), name),
                ("email".to_string(), email),
            ];
            form.extend(phone.map(|p| ("phone".to_string(), p)));
            form.extend(subject.map(|s| ("subject".to_string(), s)));
            form.push(("message".to_string(), message));
            form.extend(fields);
            commands::contact(&config, cli.base_url, form).await
        }
        Commands::DarkMode { action } => {
            commands::dark_mode(&config, matches!(action, DarkModeAction::Toggle))
        }
        Commands::FormatDate { date } => commands::format_date(&date),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

impl From<KindArg> for sitekit::validation::FieldKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Text => Self::Text,
            KindArg::Email => Self::Email,
            KindArg::Tel => Self::Telephone,
            KindArg::Other => Self::Other,
        }
    }
}
