// Intake sanitization for submitted discount rules
//
// Only the `conditions` list is reshaped; every other field of the payload
// is stored verbatim. That asymmetry is deliberate: the typed discount
// fields have always passed through this layer unvalidated, and inventing
// validation here would change what existing clients can store.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::discounts::models::{Condition, ConditionValue};
use crate::error::ApiError;

fn tag_pattern() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

/// Validate and sanitize one submitted discount rule
///
/// Empty payloads are rejected as missing data, non-objects as invalid
/// data. On success the returned object is the input with each entry of
/// `conditions` reshaped into the canonical `{field, operator, value}`
/// triple; a `conditions` key that is not a list passes through untouched.
pub fn sanitize_record(payload: &Value) -> Result<Value, ApiError> {
    if is_empty_payload(payload) {
        return Err(ApiError::MissingData);
    }

    let obj = payload.as_object().ok_or(ApiError::InvalidData)?;
    let mut record = obj.clone();

    if let Some(entries) = record.get("conditions").and_then(Value::as_array) {
        let sanitized: Vec<Value> = entries
            .iter()
            .map(|entry| {
                serde_json::to_value(sanitize_condition(entry)).unwrap_or(Value::Null)
            })
            .collect();
        record.insert("conditions".to_string(), Value::Array(sanitized));
    }

    Ok(Value::Object(record))
}

/// Nothing to store: absent body, empty containers, and the falsy scalars
/// `0`, `false`, `""`, and `"0"` all count as no submission
fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty() || s == "0",
    }
}

/// Reshape one condition entry into the canonical triple
fn sanitize_condition(entry: &Value) -> Condition {
    Condition {
        field: text_or_empty(entry.get("field")),
        operator: text_or_empty(entry.get("operator")),
        value: coerce_value(entry.get("value").unwrap_or(&Value::Null)),
    }
}

/// Coerce a condition operand; lists are coerced one level deep
pub fn coerce_value(value: &Value) -> ConditionValue {
    match value {
        Value::Array(items) => ConditionValue::List(items.iter().map(coerce_scalar).collect()),
        other => coerce_scalar(other),
    }
}

/// Coerce a single operand element
///
/// Numeric-looking values become integers (floats truncate toward zero),
/// strings are sanitized, and anything without a scalar form becomes the
/// empty string.
fn coerce_scalar(value: &Value) -> ConditionValue {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConditionValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                ConditionValue::Int(f as i64)
            } else {
                ConditionValue::Text(n.to_string())
            }
        }
        Value::String(s) => match numeric_i64(s) {
            Some(i) => ConditionValue::Int(i),
            None => ConditionValue::Text(sanitize_text(s)),
        },
        Value::Bool(true) => ConditionValue::Text("1".to_string()),
        Value::Bool(false) | Value::Null => ConditionValue::Text(String::new()),
        Value::Array(_) | Value::Object(_) => ConditionValue::Text(String::new()),
    }
}

/// Parse a numeric-looking string, truncating any fractional part
fn numeric_i64(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(i);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f as i64),
        _ => None,
    }
}

/// Plain-text sanitization: strip tags, drop control characters, collapse
/// whitespace runs, trim
pub fn sanitize_text(input: &str) -> String {
    let stripped = tag_pattern().replace_all(input, "");
    let cleaned: String = stripped.chars().filter(|c| !c.is_control()).collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Best-effort string form for `field`/`operator` entries
fn text_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => sanitize_text(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "1".to_string(),
        _ => String::new(),
    }
}
