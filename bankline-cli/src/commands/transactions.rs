//! Money commands - deposit, transfer and transaction history

use anyhow::{bail, Result};
use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;

use bankline_core::domain::requests::{DepositRequest, TransferRequest};
use bankline_core::domain::{TransactionStatus, TransactionType};
use bankline_core::{Pagination, Transaction, TransactionQuery};

use super::dashboard::print_transactions;
use super::{get_context, parse_amount, read_secret, require_session};
use crate::output;

#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List one page of transaction history
    List {
        /// Page number
        #[arg(long)]
        page: Option<u64>,
        /// Page size
        #[arg(long)]
        per_page: Option<u64>,
        /// Only this type
        #[arg(long = "type", value_enum)]
        kind: Option<KindArg>,
        /// Only this status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single transaction
    Show {
        /// Transaction ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Deposit,
    Transfer,
}

impl From<KindArg> for TransactionType {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Deposit => TransactionType::Deposit,
            KindArg::Transfer => TransactionType::Transfer,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Completed,
    Pending,
    Failed,
}

impl From<StatusArg> for TransactionStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Completed => TransactionStatus::Completed,
            StatusArg::Pending => TransactionStatus::Pending,
            StatusArg::Failed => TransactionStatus::Failed,
        }
    }
}

#[derive(Serialize)]
struct CreatedView {
    transaction: Option<Transaction>,
    message: Option<String>,
    balance: rust_decimal::Decimal,
}

#[derive(Serialize)]
struct PageView {
    transactions: Vec<Transaction>,
    pagination: Pagination,
}

fn print_created(verb: &str, view: &CreatedView) {
    match &view.transaction {
        Some(transaction) => {
            println!(
                "{} {} of {} ({})",
                "Success!".green(),
                verb,
                output::format_amount(transaction.amount).bold(),
                transaction.status
            );
            if let Some(reference) = &transaction.reference {
                println!("Reference: {}", reference);
            }
        }
        None => println!(
            "{} {}",
            "Success!".green(),
            view.message.as_deref().unwrap_or(verb)
        ),
    }
    println!("Balance: {}", output::format_amount(view.balance));
}

pub fn run_deposit(amount: &str, description: Option<String>, json: bool) -> Result<()> {
    let amount = parse_amount(amount)?;
    let mut ctx = get_context()?;
    require_session(&ctx)?;

    let store = &mut ctx.transaction_store;
    let result = store.deposit(&DepositRequest {
        amount,
        description,
    });
    let result = result.map(|response| CreatedView {
        transaction: response.transaction,
        message: response.message,
        balance: store.balance(),
    });
    output::emit(json, result, store.error(), |view| print_created("Deposit", view))
}

pub fn run_transfer(
    amount: &str,
    beneficiary_id: Option<String>,
    account_number: Option<String>,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    if beneficiary_id.is_none() && account_number.is_none() {
        bail!("Pass --to <beneficiary id> or --account <account number>");
    }
    let amount = parse_amount(amount)?;
    let mut ctx = get_context()?;
    require_session(&ctx)?;

    let pin = read_secret("Transaction PIN", false)?;

    let store = &mut ctx.transaction_store;
    let result = store.transfer(&TransferRequest {
        amount,
        beneficiary_id,
        account_number,
        description,
        transaction_pin: Some(pin),
    });
    let result = result.map(|response| CreatedView {
        transaction: response.transaction,
        message: response.message,
        balance: store.balance(),
    });
    output::emit(json, result, store.error(), |view| print_created("Transfer", view))
}

pub fn run(command: TransactionCommands) -> Result<()> {
    let mut ctx = get_context()?;
    require_session(&ctx)?;
    let store = &mut ctx.transaction_store;

    match command {
        TransactionCommands::List {
            page,
            per_page,
            kind,
            status,
            json,
        } => {
            let mut query = TransactionQuery::new();
            if let Some(p) = page {
                query = query.page(p);
            }
            if let Some(n) = per_page {
                query = query.per_page(n);
            }
            if let Some(k) = kind {
                query = query.kind(k.into());
            }
            if let Some(s) = status {
                query = query.status(s.into());
            }

            let result = store.fetch_transactions(&query).map(|t| t.to_vec());
            let result = result.map(|transactions| PageView {
                transactions,
                pagination: *store.pagination(),
            });
            output::emit(json, result, store.error(), |view| {
                print_transactions(&view.transactions);
                let p = &view.pagination;
                println!(
                    "Page {} of {} ({} total){}",
                    p.current_page,
                    p.last_page,
                    p.total,
                    if p.has_next() { " - use --page for more" } else { "" }
                );
            })
        }
        TransactionCommands::Show { id, json } => {
            let result = store.fetch_transaction_by_id(&id);
            output::emit(json, result, store.error(), |t| {
                let mut table = output::create_table();
                let amount = output::format_amount(t.amount);
                let kind = t.kind.to_string();
                let status = t.status.to_string();
                let date = t
                    .created_at
                    .map(|d| d.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec!["ID", t.id.as_str()]);
                table.add_row(vec!["Type", kind.as_str()]);
                table.add_row(vec!["Amount", amount.as_str()]);
                table.add_row(vec!["Status", status.as_str()]);
                table.add_row(vec!["Date", date.as_str()]);
                table.add_row(vec!["Reference", t.reference.as_deref().unwrap_or("-")]);
                table.add_row(vec!["Description", t.description.as_deref().unwrap_or("-")]);
                println!("{}", table);
            })
        }
    }
}
