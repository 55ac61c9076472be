//! Event log - what the client did, kept in `logs.duckdb`
//!
//! Entries carry event names, the CLI command, the route pattern and error
//! text. Balances, amounts, tokens, account numbers and profile data are
//! never written here.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use chrono::Utc;
use duckdb::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::log_migrations::LOG_MIGRATIONS;

/// File name of the event log inside the bankline directory
pub const LOG_DB_FILENAME: &str = "logs.duckdb";

/// Front end that wrote an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    Cli,
    Embedded,
}

impl EntryPoint {
    fn as_str(self) -> &'static str {
        match self {
            EntryPoint::Cli => "cli",
            EntryPoint::Embedded => "embedded",
        }
    }
}

/// Builder for one entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    pub command: Option<String>,
    pub route: Option<String>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
}

impl LogEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            ..Default::default()
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Route pattern (`/dashboard/:userId`), not the concrete path
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_error_details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }
}

/// A stored entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    /// Unix milliseconds
    pub timestamp: i64,
    pub entry_point: String,
    pub app_version: String,
    pub os: String,
    pub event: String,
    pub command: Option<String>,
    pub route: Option<String>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
}

const ENTRY_COLUMNS: &str = "id, timestamp, entry_point, app_version, os, \
     event, command, route, error_message, error_details";

impl LogEntry {
    fn from_row(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            timestamp: row.get(1)?,
            entry_point: row.get(2)?,
            app_version: row.get(3)?,
            os: row.get(4)?,
            event: row.get(5)?,
            command: row.get(6)?,
            route: row.get(7)?,
            error_message: row.get(8)?,
            error_details: row.get(9)?,
        })
    }

    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }
}

/// Which entries to read back
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub errors_only: bool,
    pub command: Option<String>,
    pub limit: usize,
}

impl LogFilter {
    pub fn recent(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    pub fn errors(limit: usize) -> Self {
        Self {
            errors_only: true,
            limit,
            ..Default::default()
        }
    }

    pub fn for_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
}

/// Append-only event log
pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    entry_point: EntryPoint,
    app_version: String,
}

impl LoggingService {
    /// Open (or create) the log in `bankline_dir` and bring its schema up
    /// to date
    pub fn new(
        bankline_dir: &Path,
        entry_point: EntryPoint,
        app_version: impl Into<String>,
    ) -> Result<Self> {
        let db_path = bankline_dir.join(LOG_DB_FILENAME);
        let conn = Connection::open(&db_path)?;
        migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
            entry_point,
            app_version: app_version.into(),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| anyhow!("Log connection lock poisoned: {}", e))
    }

    pub fn log(&self, event: LogEvent) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO sys_logs (timestamp, entry_point, app_version, os, event, \
             command, route, error_message, error_details) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                Utc::now().timestamp_millis(),
                self.entry_point.as_str(),
                self.app_version,
                std::env::consts::OS,
                event.event,
                event.command,
                event.route,
                event.error_message,
                event.error_details,
            ],
        )?;
        Ok(())
    }

    pub fn log_event(&self, event: &str) -> Result<()> {
        self.log(LogEvent::new(event))
    }

    pub fn log_command(&self, command: &str) -> Result<()> {
        self.log(LogEvent::new("command_executed").with_command(command))
    }

    pub fn log_navigation(&self, route_pattern: &str) -> Result<()> {
        self.log(LogEvent::new("route_resolved").with_route(route_pattern))
    }

    pub fn log_error(&self, event: &str, message: &str, details: Option<&str>) -> Result<()> {
        let mut entry = LogEvent::new(event).with_error(message);
        entry.error_details = details.map(str::to_string);
        self.log(entry)
    }

    /// Entries matching `filter`, newest first
    pub fn query(&self, filter: &LogFilter) -> Result<Vec<LogEntry>> {
        let mut sql = format!("SELECT {} FROM sys_logs WHERE 1 = 1", ENTRY_COLUMNS);
        if filter.errors_only {
            sql.push_str(" AND error_message IS NOT NULL");
        }
        if filter.command.is_some() {
            sql.push_str(" AND command = ?");
        }
        sql.push_str(" ORDER BY timestamp DESC, id DESC LIMIT ?");

        let limit = filter.limit as i64;
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = match &filter.command {
            Some(command) => stmt.query_map(params![command, limit], LogEntry::from_row)?,
            None => stmt.query_map(params![limit], LogEntry::from_row)?,
        };
        Ok(rows.collect::<duckdb::Result<Vec<_>>>()?)
    }

    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query(&LogFilter::recent(limit))
    }

    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query(&LogFilter::errors(limit))
    }

    pub fn count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM sys_logs", [], |row| row.get(0))?;
        Ok(n.max(0) as u64)
    }

    pub fn count_errors(&self) -> Result<u64> {
        let conn = self.conn()?;
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sys_logs WHERE error_message IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(n.max(0) as u64)
    }

    /// Remove entries written before `timestamp_ms`; returns how many
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM sys_logs WHERE timestamp < ?",
            params![timestamp_ms],
        )?;
        Ok(deleted as u64)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Apply every embedded migration not yet recorded in `sys_migrations`.
///
/// The bookkeeping table itself is created idempotently first.
fn migrate(conn: &Connection) -> Result<()> {
    let Some(((bootstrap_name, bootstrap_sql), rest)) = LOG_MIGRATIONS.split_first() else {
        return Ok(());
    };
    conn.execute_batch(bootstrap_sql)?;

    let applied: Vec<String> = {
        let mut stmt = conn.prepare("SELECT migration_name FROM sys_migrations")?;
        let names = stmt.query_map([], |row| row.get(0))?;
        names.collect::<duckdb::Result<_>>()?
    };

    let mark = |name: &str| -> Result<()> {
        conn.execute(
            "INSERT INTO sys_migrations (migration_name) VALUES (?)",
            params![name],
        )?;
        Ok(())
    };

    if !applied.iter().any(|a| a == bootstrap_name) {
        mark(bootstrap_name)?;
    }
    for (name, sql) in rest {
        if applied.iter().any(|a| a == name) {
            continue;
        }
        tracing::debug!(migration = name, "Applying event log migration");
        conn.execute_batch(sql)?;
        mark(name)?;
    }
    Ok(())
}
