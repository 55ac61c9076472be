//! Account commands - register, login, logout, whoami

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;

use bankline_core::domain::requests::{Credentials, RegisterRequest};
use bankline_core::User;

use super::{get_context, read_secret, require_session};
use crate::output;

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

fn print_user(user: &User) {
    let mut table = output::create_table();
    table.add_row(vec!["ID", user.id.as_str()]);
    table.add_row(vec!["Name", user.name.as_deref().unwrap_or("-")]);
    table.add_row(vec!["Email", user.email.as_deref().unwrap_or("-")]);
    table.add_row(vec!["Phone", user.phone.as_deref().unwrap_or("-")]);
    table.add_row(vec!["Account", user.account_number.as_deref().unwrap_or("-")]);
    let balance = output::format_amount(user.balance);
    table.add_row(vec!["Balance", balance.as_str()]);
    println!("{}", table);
}

pub fn run_register(
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    json: bool,
) -> Result<()> {
    let mut ctx = get_context()?;

    let name = prompt_if_missing(name, "Full name")?;
    let email = prompt_if_missing(email, "Email")?;
    let password = read_secret("Password", true)?;

    let request = RegisterRequest {
        name,
        email,
        password_confirmation: password.clone(),
        password,
        phone,
    };

    let store = &mut ctx.session_store;
    let result = store.register(&request);
    output::emit(json, result, store.error(), |response| {
        output::success(response.message.as_deref().unwrap_or("Registration successful"));
        println!("Run 'bl login' to sign in.");
    })
}

pub fn run_login(email: Option<String>, json: bool) -> Result<()> {
    let mut ctx = get_context()?;

    let email = prompt_if_missing(email, "Email")?;
    let password = read_secret("Password", false)?;

    let store = &mut ctx.session_store;
    let result = store.login(&Credentials::new(email, password));
    output::emit(json, result, store.error(), |user| {
        println!("{} Signed in as {}", "Success!".green(), user.display_name().bold());
    })
}

pub fn run_logout(json: bool) -> Result<()> {
    let mut ctx = get_context()?;
    let was_signed_in = ctx.session_store.is_authenticated();

    // The server is always told, even without a local token
    let result = ctx.sign_out();
    if !was_signed_in {
        if let Err(e) = &result {
            tracing::debug!(error = %e, "Logout without a local session");
        }
        if json {
            println!("{}", serde_json::json!({"success": true, "data": null}));
        } else {
            output::info("Already signed out.");
        }
        return Ok(());
    }
    if let Err(e) = &result {
        // The local session is gone either way
        if !json {
            output::warning(&format!("Server did not confirm logout: {}", e));
            output::success("Signed out locally.");
            return Ok(());
        }
    }
    output::emit(json, result, ctx.session_store.error(), |_| {
        output::success("Signed out.");
    })
}

pub fn run_whoami(refresh: bool, json: bool) -> Result<()> {
    let mut ctx = get_context()?;
    require_session(&ctx)?;

    if refresh {
        let store = &mut ctx.session_store;
        let result = store.fetch_current_user();
        return output::emit(json, result, store.error(), print_user);
    }

    match ctx.session_store.current_user() {
        Some(user) => output::emit(json, Ok(user), None, print_user),
        None => {
            output::warning("Signed in, but no user record is stored. Try 'bl whoami --refresh'.");
            Ok(())
        }
    }
}
