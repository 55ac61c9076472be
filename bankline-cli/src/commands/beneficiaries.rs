//! Beneficiary commands - list, add, update, remove

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;

use bankline_core::domain::BeneficiaryInput;
use bankline_core::Beneficiary;

use super::{get_context, require_session};
use crate::output;

#[derive(Subcommand)]
pub enum BeneficiaryCommands {
    /// List saved beneficiaries
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a new beneficiary
    Add {
        #[command(flatten)]
        fields: BeneficiaryFields,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit a beneficiary; only the given fields are sent
    Update {
        /// Beneficiary ID
        id: String,
        #[command(flatten)]
        fields: BeneficiaryFields,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a beneficiary
    Remove {
        /// Beneficiary ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct BeneficiaryFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    account_number: Option<String>,
    #[arg(long)]
    bank_name: Option<String>,
    #[arg(long)]
    nickname: Option<String>,
}

impl From<BeneficiaryFields> for BeneficiaryInput {
    fn from(f: BeneficiaryFields) -> Self {
        BeneficiaryInput {
            name: f.name,
            account_number: f.account_number,
            bank_name: f.bank_name,
            nickname: f.nickname,
        }
    }
}

fn print_beneficiaries(beneficiaries: &[Beneficiary]) {
    if beneficiaries.is_empty() {
        println!("No beneficiaries saved.");
        return;
    }
    let mut table = output::create_table();
    table.set_header(vec!["ID", "Name", "Account", "Bank", "Nickname"]);
    for b in beneficiaries {
        table.add_row(vec![
            b.id.clone(),
            b.name.clone().unwrap_or_default(),
            b.account_number.clone().unwrap_or_default(),
            b.bank_name.clone().unwrap_or_default(),
            b.nickname.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);
}

pub fn run(command: BeneficiaryCommands) -> Result<()> {
    let mut ctx = get_context()?;
    require_session(&ctx)?;
    let store = &mut ctx.beneficiary_store;

    match command {
        BeneficiaryCommands::List { json } => {
            let result = store.fetch_beneficiaries().map(|b| b.to_vec());
            output::emit(json, result, store.error(), |list| print_beneficiaries(list))
        }
        BeneficiaryCommands::Add { fields, json } => {
            let input = BeneficiaryInput::from(fields);
            if input.name.is_none() || input.account_number.is_none() {
                bail!("--name and --account-number are required");
            }
            let result = store.add_beneficiary(&input);
            output::emit(json, result, store.error(), |response| {
                match &response.beneficiary {
                    Some(b) => println!(
                        "{} Added beneficiary {} ({})",
                        "Success!".green(),
                        b.name.as_deref().unwrap_or("-"),
                        b.id
                    ),
                    None => output::success(
                        response.message.as_deref().unwrap_or("Beneficiary added"),
                    ),
                }
            })
        }
        BeneficiaryCommands::Update { id, fields, json } => {
            let input = BeneficiaryInput::from(fields);
            if input.is_empty() {
                bail!("Nothing to update. Pass at least one field.");
            }
            // Load first so the local list is replaced in place
            store.fetch_beneficiaries()?;
            if store.get_beneficiary_by_id(&id).is_none() {
                output::warning(&format!("Beneficiary {} is not in your list", id));
            }
            let result = store.update_beneficiary(&id, &input);
            output::emit(json, result, store.error(), |_| {
                output::success(&format!("Updated beneficiary {}", id));
            })
        }
        BeneficiaryCommands::Remove { id, force, json } => {
            if !force && !json {
                let label = store
                    .fetch_beneficiaries()
                    .ok()
                    .and_then(|list| list.iter().find(|b| b.id == id).cloned())
                    .and_then(|b| b.name)
                    .unwrap_or_else(|| id.clone());
                if !Confirm::new()
                    .with_prompt(format!("Delete beneficiary {}?", label))
                    .default(false)
                    .interact()?
                {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            let result = store.delete_beneficiary(&id);
            output::emit(json, result, store.error(), |_| {
                output::success(&format!("Deleted beneficiary {}", id));
            })
        }
    }
}
