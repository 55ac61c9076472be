//! Output formatting utilities

use anyhow::{anyhow, Result};
use bankline_core::domain::result::Result as CoreResult;
use bankline_core::OperationResult;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rust_decimal::Decimal;
use serde::Serialize;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Money with two decimals and thousands separators
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac)
}

/// Print a store action's outcome.
///
/// With `json`, the outcome is printed as an [`OperationResult`]. Without
/// it, `render` prints a success and failures show `shown_error` (the
/// store's message) plus any per-field validation errors. Failures become
/// the command's error either way.
pub fn emit<T: Serialize>(
    json: bool,
    result: CoreResult<T>,
    shown_error: Option<&str>,
    render: impl FnOnce(&T),
) -> Result<()> {
    let message = match &result {
        Ok(_) => None,
        Err(e) => Some(
            shown_error
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string()),
        ),
    };

    if json {
        let op: OperationResult<T> = result.into();
        println!("{}", serde_json::to_string_pretty(&op)?);
        return match message {
            Some(m) => Err(anyhow!(m)),
            None => Ok(()),
        };
    }

    match result {
        Ok(data) => {
            render(&data);
            Ok(())
        }
        Err(e) => {
            for (field, msg) in e.field_errors() {
                error(&format!("  {}: {}", field, msg));
            }
            Err(anyhow!(message.unwrap_or_else(|| e.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(125050, 2)), "1,250.50");
        assert_eq!(format_amount(Decimal::new(5, 0)), "5.00");
        assert_eq!(format_amount(Decimal::new(-123456789, 2)), "-1,234,567.89");
        assert_eq!(format_amount(Decimal::new(100000000, 2)), "1,000,000.00");
    }
}
