//! Config command - show and change client settings

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use bankline_core::config::{Config, API_URL_ENV};

use super::get_bankline_dir;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Point the client at another API
    SetApiUrl {
        /// Base URL, e.g. https://bank.example.com/api
        url: String,
    },
    /// Set the request timeout
    SetTimeout {
        /// Seconds
        secs: u64,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let bankline_dir = get_bankline_dir()?;
    let mut config = Config::load(&bankline_dir)?;

    match command {
        ConfigCommands::Show { json } => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "api_base_url": config.api_base_url,
                        "timeout_secs": config.timeout_secs,
                        "bankline_dir": bankline_dir.to_string_lossy(),
                    })
                );
            } else {
                println!("{}", "Settings".bold());
                println!("  API: {}", config.api_base_url);
                println!("  Timeout: {}s", config.timeout_secs);
                println!("  Directory: {}", bankline_dir.display());
                if std::env::var(API_URL_ENV).is_ok() {
                    println!("  ({} is set and overrides the saved API URL)", API_URL_ENV);
                }
            }
        }
        ConfigCommands::SetApiUrl { url } => {
            url::Url::parse(url.trim()).with_context(|| format!("Invalid URL: {}", url))?;
            config.set_api_base_url(url.trim());
            config.save(&bankline_dir)?;
            println!("{} API URL set to {}", "Success!".green(), config.api_base_url);
        }
        ConfigCommands::SetTimeout { secs } => {
            if secs == 0 {
                anyhow::bail!("Timeout must be at least one second");
            }
            config.timeout_secs = secs;
            config.save(&bankline_dir)?;
            println!("{} Timeout set to {}s", "Success!".green(), secs);
        }
    }

    Ok(())
}
