//! Bankline CLI - your bank account in the terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use bankline_core::services::LogEvent;
use commands::{auth, beneficiaries, config, dashboard, logs, navigate, profile, transactions};
use commands::{get_logger, log_event};

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "BANKLINE_LOG";

/// Bankline - your bank account in the terminal
#[derive(Parser)]
#[command(name = "bl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign in (password is prompted, or read from stdin when piped)
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign out and forget the saved session
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the signed-in user
    Whoami {
        /// Fetch a fresh copy from the server
        #[arg(long)]
        refresh: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Balance, totals and recent transactions
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage your profile
    Profile {
        #[command(subcommand)]
        command: profile::ProfileCommands,
    },

    /// Manage saved beneficiaries
    Beneficiaries {
        #[command(subcommand)]
        command: beneficiaries::BeneficiaryCommands,
    },

    /// Deposit money into your account
    Deposit {
        /// Amount, e.g. 250.50
        amount: String,
        #[arg(long)]
        description: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send money (PIN is prompted, or read from stdin when piped)
    Transfer {
        /// Amount, e.g. 250.50
        amount: String,
        /// Beneficiary ID
        #[arg(long = "to", conflicts_with = "account")]
        beneficiary: Option<String>,
        /// Recipient account number
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse transaction history
    Transactions {
        #[command(subcommand)]
        command: transactions::TransactionCommands,
    },

    /// Resolve a route through the sign-in guard
    Navigate {
        /// Route path, e.g. /beneficiaries
        path: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change client settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    /// Name recorded in the event log
    fn name(&self) -> &'static str {
        match self {
            Commands::Register { .. } => "register",
            Commands::Login { .. } => "login",
            Commands::Logout { .. } => "logout",
            Commands::Whoami { .. } => "whoami",
            Commands::Dashboard { .. } => "dashboard",
            Commands::Profile { .. } => "profile",
            Commands::Beneficiaries { .. } => "beneficiaries",
            Commands::Deposit { .. } => "deposit",
            Commands::Transfer { .. } => "transfer",
            Commands::Transactions { .. } => "transactions",
            Commands::Navigate { .. } => "navigate",
            Commands::Config { .. } => "config",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let name = cli.command.name();
    // `logs` reads the log; recording it would only add noise
    let logger = if name == "logs" { None } else { get_logger() };
    log_event(&logger, LogEvent::new("command_executed").with_command(name));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("command_failed")
                    .with_command(name)
                    .with_error(e.to_string()),
            );
            output::error(&format!("{}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register {
            name,
            email,
            phone,
            json,
        } => auth::run_register(name, email, phone, json),
        Commands::Login { email, json } => auth::run_login(email, json),
        Commands::Logout { json } => auth::run_logout(json),
        Commands::Whoami { refresh, json } => auth::run_whoami(refresh, json),
        Commands::Dashboard { json } => dashboard::run(json),
        Commands::Profile { command } => profile::run(command),
        Commands::Beneficiaries { command } => beneficiaries::run(command),
        Commands::Deposit {
            amount,
            description,
            json,
        } => transactions::run_deposit(&amount, description, json),
        Commands::Transfer {
            amount,
            beneficiary,
            account,
            description,
            json,
        } => transactions::run_transfer(&amount, beneficiary, account, description, json),
        Commands::Transactions { command } => transactions::run(command),
        Commands::Navigate { path, json } => navigate::run(&path, json),
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
