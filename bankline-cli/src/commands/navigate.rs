//! Navigate command - resolve a client route through the auth guard

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use bankline_core::services::LogEvent;

use super::{get_context, get_logger, log_event};

pub fn run(path: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let resolved = ctx.navigate(path)?;

    log_event(
        &get_logger(),
        LogEvent::new("route_resolved").with_route(resolved.route.pattern()),
    );

    if json {
        let redirects: Vec<String> = resolved.redirects.iter().map(|r| r.path()).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "requested": path,
                "path": resolved.route.path(),
                "name": resolved.route.name(),
                "requires_auth": resolved.route.requires_auth(),
                "redirects": redirects,
            }))?
        );
        return Ok(());
    }

    for from in &resolved.redirects {
        println!("{} {}", "redirect".yellow(), from);
    }
    println!(
        "{} {}{}",
        "enter".green(),
        resolved.route.path().bold(),
        resolved
            .route
            .name()
            .map(|n| format!(" ({})", n))
            .unwrap_or_default()
    );
    Ok(())
}
