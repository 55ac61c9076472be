//! Lenient deserializers for server payloads
//!
//! The banking API is not consistent about scalar encodings: ids arrive as
//! numbers or strings, amounts as JSON numbers or decimal strings.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Deserialize ID that can be number or string
pub fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::String(s) => Ok(s),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

/// Deserialize optional ID that can be number or string
pub fn deserialize_optional_id<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

fn parse_decimal<E: serde::de::Error>(value: JsonValue) -> std::result::Result<Decimal, E> {
    match value {
        JsonValue::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .map_err(|e| E::custom(format!("invalid decimal: {}", e))),
        JsonValue::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|e| E::custom(format!("invalid decimal: {}", e))),
        _ => Err(E::custom("expected number or string for amount")),
    }
}

/// Deserialize amount that can be number or string
pub fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    parse_decimal(value)
}

/// Amount where `null` means zero
pub fn deserialize_amount_or_zero<'de, D>(
    deserializer: D,
) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_optional_amount(deserializer)?.unwrap_or(Decimal::ZERO))
}

/// Any field where `null` reads as the type's default
pub fn deserialize_or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize optional amount that can be number, string or null
pub fn deserialize_optional_amount<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => parse_decimal(v).map(Some),
    }
}

/// Deserialize a timestamp in RFC 3339 or `YYYY-MM-DD HH:MM:SS` form.
///
/// Unrecognized formats become `None` rather than failing the whole payload.
pub fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_timestamp))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
