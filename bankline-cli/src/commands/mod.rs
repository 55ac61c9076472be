//! CLI command implementations

pub mod auth;
pub mod beneficiaries;
pub mod config;
pub mod dashboard;
pub mod logs;
pub mod navigate;
pub mod profile;
pub mod transactions;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use bankline_core::services::{EntryPoint, LogEvent, LoggingService};
use bankline_core::BanklineContext;
use dialoguer::Password;
use rust_decimal::Decimal;

/// Environment variable overriding the bankline directory
pub const DIR_ENV: &str = "BANKLINE_DIR";

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let bankline_dir = get_bankline_dir().ok()?;
    std::fs::create_dir_all(&bankline_dir).ok()?;
    LoggingService::new(&bankline_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        if let Err(e) = l.log(event) {
            tracing::debug!(error = %e, "Event log write failed");
        }
    }
}

/// Get the bankline directory from environment or default (`~/.bankline`)
pub fn get_bankline_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = dirs::home_dir().context("Could not find home directory; set BANKLINE_DIR")?;
    Ok(home.join(".bankline"))
}

/// Build the context and restore the saved session
pub fn get_context() -> Result<BanklineContext> {
    let bankline_dir = get_bankline_dir()?;
    BanklineContext::new(&bankline_dir).context("Failed to initialize bankline context")
}

/// Fail early when there is no saved session
pub fn require_session(ctx: &BanklineContext) -> Result<()> {
    if !ctx.session_store.is_authenticated() {
        bail!("Not signed in. Run 'bl login' first.");
    }
    Ok(())
}

/// Read a secret: prompt on a terminal, otherwise one line from stdin
pub fn read_secret(prompt: &str, confirm: bool) -> Result<String> {
    if atty::isnt(atty::Stream::Stdin) {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read secret from stdin")?;
        let secret = line.trim_end_matches(['\r', '\n']).to_string();
        if secret.is_empty() {
            bail!("{} cannot be empty", prompt);
        }
        return Ok(secret);
    }

    let mut input = Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Confirm", "Entries do not match");
    }
    Ok(input.interact()?)
}

/// Parse a strictly positive amount such as `250` or `250.50`
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let amount = Decimal::from_str(raw.trim())
        .with_context(|| format!("Invalid amount: {}", raw))?;
    if amount <= Decimal::ZERO {
        bail!("Amount must be greater than zero");
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("250.50").unwrap(), Decimal::new(25050, 2));
        assert_eq!(parse_amount(" 10 ").unwrap(), Decimal::TEN);
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("ten").is_err());
    }
}
