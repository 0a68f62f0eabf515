//! Command-line entry point: flags, logging setup and result printing

use crate::config::AppConfig;
use crate::gmail::GmailSource;
use crate::sentiment::LexiconScorer;
use crate::source::analyze_messages;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Analyze recent inbox emails and print a metric table per message
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// How many of the most recent inbox messages to analyze
    #[arg(long, short = 'n')]
    num_emails: Option<u32>,

    /// Path to a Google authorized-user credentials file
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Bearer token to use instead of the credentials file
    #[arg(long)]
    access_token: Option<String>,

    /// Gmail API base URL
    #[arg(long)]
    api_url: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl Cli {
    /// Flags win over environment settings
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(n) = self.num_emails {
            config.num_emails = n;
        }
        if let Some(path) = &self.credentials {
            config.credentials_path.clone_from(path);
        }
        if let Some(token) = &self.access_token {
            config.access_token = Some(token.clone());
        }
        if let Some(url) = &self.api_url {
            config.api_url.clone_from(url);
        }
        config
    }
}

pub fn run() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.apply(AppConfig::default());
    info!(num_emails = config.num_emails, api_url = %config.api_url, "Starting inbox analysis");

    let token = config
        .resolve_access_token()
        .context("Could not obtain a Gmail access token")?;
    let source = GmailSource::with_base_url(&config.api_url, token);
    let results = analyze_messages(&source, &LexiconScorer, config.num_emails)
        .context("Could not list inbox messages")?;

    match args.format {
        OutputFormat::Table => print!("{results}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }

    Ok(())
}
