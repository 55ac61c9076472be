//! Dashboard command - balance, totals and recent activity

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use bankline_core::domain::responses::DashboardResponse;
use bankline_core::{Transaction, TransactionQuery};

use super::{get_context, require_session};
use crate::output;

#[derive(Serialize)]
struct DashboardView {
    #[serde(flatten)]
    server: DashboardResponse,
    beneficiaries: usize,
    total_deposits: rust_decimal::Decimal,
    total_transfers: rust_decimal::Decimal,
}

pub fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions.");
        return;
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Date", "Type", "Amount", "Status", "Description"]);
    for t in transactions {
        let date = t
            .created_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let status = match t.status {
            bankline_core::domain::TransactionStatus::Completed => t.status.to_string().green(),
            bankline_core::domain::TransactionStatus::Pending => t.status.to_string().yellow(),
            bankline_core::domain::TransactionStatus::Failed => t.status.to_string().red(),
            bankline_core::domain::TransactionStatus::Other => t.status.to_string().normal(),
        };
        table.add_row(vec![
            t.id.clone(),
            date,
            t.kind.to_string(),
            output::format_amount(t.amount),
            status.to_string(),
            t.description.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);
}

pub fn run(json: bool) -> Result<()> {
    let mut ctx = get_context()?;
    require_session(&ctx)?;
    let user_id = ctx
        .session()
        .user_id()
        .context("No stored user. Run 'bl whoami --refresh' first.")?;

    let server = ctx.user_service.get_dashboard(&user_id)?;

    // Best effort: the dashboard still renders without these
    if let Err(e) = ctx.beneficiary_store.fetch_beneficiaries() {
        tracing::warn!(error = %e, "Could not load beneficiaries for the dashboard");
    }
    if let Err(e) = ctx.transaction_store.fetch_transactions(&TransactionQuery::new()) {
        tracing::warn!(error = %e, "Could not load transactions for the dashboard");
    }

    let view = DashboardView {
        beneficiaries: ctx.beneficiary_store.beneficiaries_count(),
        total_deposits: ctx.transaction_store.total_deposits(),
        total_transfers: ctx.transaction_store.total_transfers(),
        server,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let balance = view
        .server
        .balance
        .unwrap_or_else(|| ctx.transaction_store.balance());
    let name = ctx
        .session()
        .user()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    println!("{}", format!("Welcome back, {}", name).bold());
    println!();

    let mut table = output::create_table();
    let balance = output::format_amount(balance);
    let deposits = output::format_amount(view.total_deposits);
    let transfers = output::format_amount(view.total_transfers);
    let count = view.beneficiaries.to_string();
    table.add_row(vec!["Balance", balance.as_str()]);
    table.add_row(vec!["Deposits (loaded)", deposits.as_str()]);
    table.add_row(vec!["Transfers (loaded)", transfers.as_str()]);
    table.add_row(vec!["Beneficiaries", count.as_str()]);
    println!("{}", table);
    println!();

    println!("{}", "Recent Transactions".bold());
    let recent: &[Transaction] = if view.server.recent_transactions.is_empty() {
        ctx.transaction_store.recent_transactions()
    } else {
        &view.server.recent_transactions
    };
    print_transactions(recent);

    Ok(())
}
