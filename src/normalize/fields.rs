//! Lenient field readers for raw backend rows.
//!
//! Every reader takes a list of key aliases and uses the first one that
//! holds a usable value. `null` counts as absent.

use serde_json::Value;

fn first<'a>(row: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| row.get(*k))
        .find(|v| !v.is_null())
}

/// Non-empty string; numbers are stringified
pub(super) fn str_field(row: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|k| row.get(*k)).find_map(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub(super) fn text_field(row: &Value, keys: &[&str]) -> String {
    str_field(row, keys).unwrap_or_default()
}

/// Non-negative counter; negative, fractional-negative or garbage → 0
pub(super) fn u64_field(row: &Value, keys: &[&str]) -> u64 {
    match first(row, keys) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

pub(super) fn opt_bool(row: &Value, keys: &[&str]) -> Option<bool> {
    match first(row, keys)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "t" => Some(true),
            "false" | "0" | "no" | "f" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub(super) fn bool_field(row: &Value, keys: &[&str]) -> bool {
    opt_bool(row, keys).unwrap_or(false)
}

/// Nested relation: an object, or the first object of an array
pub(super) fn relation<'a>(row: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| row.get(*k)).find_map(|v| match v {
        Value::Object(_) => Some(v),
        Value::Array(items) => items.iter().find(|i| i.is_object()),
        _ => None,
    })
}

/// Keyword list from an array of strings or a comma-separated string
pub(super) fn keyword_list(row: &Value, keys: &[&str]) -> Vec<String> {
    let clean = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };
    match first(row, keys) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(clean)
            .collect(),
        Some(Value::String(s)) => s.split(',').filter_map(clean).collect(),
        _ => Vec::new(),
    }
}
