//! `bl logs` - read and prune the local event log

use anyhow::{Context, Result};
use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use serde_json::json;

use bankline_core::services::{EntryPoint, LogEntry, LogFilter, LoggingService};

use super::get_bankline_dir;
use crate::output;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show the newest entries
    List {
        #[arg(short = 'n', long, default_value_t = 50)]
        limit: usize,
        /// Only failed commands and other errors
        #[arg(long)]
        errors: bool,
        /// Only entries recorded for this command, e.g. `transfer`
        #[arg(long)]
        command: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete old entries
    Clear {
        /// Keep the last N days
        #[arg(long, default_value_t = 30, conflicts_with = "before")]
        keep_days: u64,
        /// Delete everything before this date (YYYY-MM-DD)
        #[arg(long)]
        before: Option<NaiveDate>,
        /// Don't ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Entry counts and where the log lives
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: LogsCommands) -> Result<()> {
    let dir = get_bankline_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let log = LoggingService::new(&dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .context("Failed to open the event log")?;

    match command {
        LogsCommands::List {
            limit,
            errors,
            command,
            json,
        } => {
            let mut filter = if errors {
                LogFilter::errors(limit)
            } else {
                LogFilter::recent(limit)
            };
            if let Some(command) = command {
                filter = filter.for_command(command);
            }
            list(&log, &filter, json)
        }
        LogsCommands::Clear {
            keep_days,
            before,
            yes,
            json,
        } => {
            let cutoff = match before {
                Some(date) => start_of_day(date)?,
                None => Utc::now()
                    .checked_sub_days(Days::new(keep_days))
                    .context("--keep-days is too large")?,
            };
            clear(&log, cutoff, yes || json, json)
        }
        LogsCommands::Stats { json } => stats(&log, json),
    }
}

fn list(log: &LoggingService, filter: &LogFilter, json: bool) -> Result<()> {
    let entries = log.query(filter)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        output::info("The event log is empty.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["When", "Event", "Command", "Route", "Error"]);
    for entry in &entries {
        table.add_row(row(entry));
    }
    println!("{}", table);
    Ok(())
}

fn row(entry: &LogEntry) -> Vec<String> {
    let when = Utc
        .timestamp_millis_opt(entry.timestamp)
        .single()
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "?".to_string());
    let error = match (&entry.error_message, &entry.error_details) {
        (Some(message), Some(details)) => format!("{} ({})", message, details).red().to_string(),
        (Some(message), None) => message.red().to_string(),
        _ => String::new(),
    };
    vec![
        when,
        entry.event.clone(),
        entry.command.clone().unwrap_or_default(),
        entry.route.clone().unwrap_or_default(),
        error,
    ]
}

fn start_of_day(date: NaiveDate) -> Result<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0).context("Invalid date")?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .context("Date does not exist in the local time zone")
}

fn clear(log: &LoggingService, cutoff: DateTime<Utc>, skip_prompt: bool, json: bool) -> Result<()> {
    let label = cutoff.with_timezone(&Local).format("%Y-%m-%d %H:%M");
    if !skip_prompt {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete event log entries from before {}?", label))
            .default(false)
            .interact()?;
        if !confirmed {
            output::warning("Nothing deleted.");
            return Ok(());
        }
    }

    let deleted = log.delete_before(cutoff.timestamp_millis())?;
    if json {
        println!("{}", json!({ "deleted": deleted, "before": cutoff.to_rfc3339() }));
    } else {
        output::success(&format!("Removed {} entries from before {}", deleted, label));
    }
    Ok(())
}

fn stats(log: &LoggingService, json: bool) -> Result<()> {
    let total = log.count()?;
    let errors = log.count_errors()?;
    let path = log.db_path();
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "entries": total,
                "errors": errors,
                "path": path.display().to_string(),
                "size_bytes": size,
            }))?
        );
        return Ok(());
    }

    println!("{}", "Event log".bold());
    println!("  {:<8} {}", "Entries", total);
    let errors = if errors > 0 {
        errors.to_string().red()
    } else {
        errors.to_string().normal()
    };
    println!("  {:<8} {}", "Errors", errors);
    println!("  {:<8} {} ({} KiB)", "File", path.display(), size / 1024);
    Ok(())
}
