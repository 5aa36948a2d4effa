//! bologna-precip command-line entry point.
//!
//! Drives the same cache-aside services as the HTTP server. Output goes to
//! stdout as JSON; logs go to stderr.

use std::sync::Arc;

use anyhow::Result;
use bologna_precip_client::OpenDataClient;
use bologna_precip_core::cache::keys;
use bologna_precip_core::{AppConfig, DatasetService, PrecipitationService, WeekRange, open_store};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Command::Range { date } => {
            let range = WeekRange::containing(date);
            json!({
                "week_start": range.start(),
                "week_end": range.end(),
                "cache_key": keys::weekly_precipitation(&range),
            })
        }
        Command::Dataset => {
            let config = load_config(&cli)?;
            let store = open_store(&config).await?;
            let client = Arc::new(OpenDataClient::from_app_config(&config)?);
            serde_json::to_value(DatasetService::new(store, client).get_dataset().await?)?
        }
        Command::Week { date } => {
            let config = load_config(&cli)?;
            let store = open_store(&config).await?;
            let client = Arc::new(OpenDataClient::from_app_config(&config)?);
            serde_json::to_value(PrecipitationService::new(store, client).get_weekly_precipitation(date).await?)?
        }
    };

    let rendered = if cli.pretty { serde_json::to_string_pretty(&output)? } else { output.to_string() };
    println!("{rendered}");

    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load()?;
    if let Some(backend) = cli.backend {
        config.cache_backend = backend.into();
        config.validate()?;
    }
    Ok(config)
}
