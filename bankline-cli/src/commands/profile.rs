//! Profile commands - details, picture, transaction PIN, next of kin

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Subcommand;
use dialoguer::Input;

use bankline_core::domain::requests::{NextOfKinRequest, ProfileUpdate, TransactionPinRequest};
use bankline_core::domain::responses::MessageResponse;

use super::{get_context, read_secret, require_session};
use crate::output;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the profile as the server has it
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update profile fields; only the given fields are sent
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        date_of_birth: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Upload a profile picture
    Picture {
        /// Image file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create or change the transaction PIN
    Pin {
        /// Change an existing PIN (asks for the current one)
        #[arg(long)]
        change: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add next-of-kin details
    NextOfKin {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        relationship: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn ask(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

fn print_message(response: &MessageResponse, fallback: &str) {
    output::success(response.message.as_deref().unwrap_or(fallback));
}

pub fn run(command: ProfileCommands) -> Result<()> {
    let mut ctx = get_context()?;
    require_session(&ctx)?;

    match command {
        ProfileCommands::Show { json } => {
            let store = &mut ctx.session_store;
            let result = store.fetch_current_user();
            output::emit(json, result, store.error(), |user| {
                let mut table = output::create_table();
                table.add_row(vec!["ID", user.id.as_str()]);
                table.add_row(vec!["Name", user.name.as_deref().unwrap_or("-")]);
                table.add_row(vec!["Email", user.email.as_deref().unwrap_or("-")]);
                table.add_row(vec!["Phone", user.phone.as_deref().unwrap_or("-")]);
                for (key, value) in &user.extra {
                    let text = value
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| value.to_string());
                    table.add_row(vec![key.clone(), text]);
                }
                println!("{}", table);
            })
        }
        ProfileCommands::Update {
            name,
            phone,
            address,
            date_of_birth,
            json,
        } => {
            let update = ProfileUpdate {
                name,
                phone,
                address,
                date_of_birth,
            };
            if update == ProfileUpdate::default() {
                bail!(
                    "Nothing to update. Pass at least one of --name, --phone, --address, --date-of-birth."
                );
            }

            let result = ctx.user_service.update_profile(&update);
            // Keep the stored user in step with the server's copy
            if let Ok(MessageResponse {
                user: Some(user), ..
            }) = &result
            {
                ctx.session_store.update_user(user.clone())?;
            }
            output::emit(json, result, None, |r| print_message(r, "Profile updated"))
        }
        ProfileCommands::Picture { file, json } => {
            let result = ctx.user_service.upload_profile_picture(&file);
            output::emit(json, result, None, |r| {
                print_message(r, "Profile picture uploaded")
            })
        }
        ProfileCommands::Pin { change, json } => {
            let current_pin = if change {
                Some(read_secret("Current PIN", false)?)
            } else {
                None
            };
            let pin = read_secret("New PIN", true)?;
            let request = TransactionPinRequest {
                current_pin,
                pin_confirmation: pin.clone(),
                pin,
            };

            let result = if change {
                ctx.user_service.update_transaction_pin(&request)
            } else {
                ctx.user_service.create_transaction_pin(&request)
            };
            output::emit(json, result, None, |r| print_message(r, "Transaction PIN saved"))
        }
        ProfileCommands::NextOfKin {
            name,
            relationship,
            phone,
            email,
            address,
            json,
        } => {
            let request = NextOfKinRequest {
                name: ask(name, "Name")?,
                relationship: ask(relationship, "Relationship")?,
                phone: ask(phone, "Phone")?,
                email,
                address,
            };
            let result = ctx.user_service.add_next_of_kin(&request);
            output::emit(json, result, None, |r| print_message(r, "Next of kin saved"))
        }
    }
}
