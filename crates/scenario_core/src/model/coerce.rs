//! Lenient field coercion for records crossing the storage/import boundary.
//!
//! # Responsibility
//! - Turn loosely-typed JSON values into canonical field values.
//! - Provide the comma-list splitter used for tag/character text entry.
//!
//! # Invariants
//! - Coercion never fails; wrong-typed input maps to the field default.
//! - Minute values are finite and non-negative.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serializer;
use serde_json::Value;

static LIST_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",|、").expect("valid list separator regex"));

/// Splits a comma-separated entry field into trimmed, non-empty items.
///
/// Both the ASCII comma and the ideographic comma (`、`) separate items.
pub fn split_list(text: &str) -> Vec<String> {
    LIST_SEPARATOR_RE
        .split(text)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Coerces a scalar into text. Missing, null and structured values become empty.
pub fn coerce_string(value: Option<Value>) -> String {
    match value {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

/// Coerces a list field.
///
/// Arrays keep their scalar members in order; a bare string is treated as a
/// comma-separated entry; anything else yields an empty list.
pub fn coerce_string_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                Value::Number(number) => Some(number.to_string()),
                Value::Bool(flag) => Some(flag.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(text)) => split_list(&text),
        _ => Vec::new(),
    }
}

/// Coerces a duration field into non-negative minutes.
///
/// Numeric strings are parsed; everything non-numeric counts as zero.
pub fn coerce_minutes(value: Option<Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    sanitize_minutes(raw)
}

/// Clamps an in-memory minute value to the canonical range.
pub fn sanitize_minutes(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}

/// Writes whole minute values as integers so exports read `5`, not `5.0`.
pub fn serialize_minutes<S: Serializer>(minutes: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let value = *minutes;
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{coerce_minutes, coerce_string, coerce_string_list, split_list};
    use serde_json::json;

    #[test]
    fn split_list_accepts_ascii_and_ideographic_commas() {
        assert_eq!(
            split_list("主人公, 兄、友人 ,, "),
            vec!["主人公".to_string(), "兄".to_string(), "友人".to_string()]
        );
    }

    #[test]
    fn minutes_coercion_handles_strings_negatives_and_garbage() {
        assert_eq!(coerce_minutes(Some(json!(6))), 6.0);
        assert_eq!(coerce_minutes(Some(json!(" 2.5 "))), 2.5);
        assert_eq!(coerce_minutes(Some(json!(-4))), 0.0);
        assert_eq!(coerce_minutes(Some(json!("soon"))), 0.0);
        assert_eq!(coerce_minutes(Some(json!({"m": 1}))), 0.0);
        assert_eq!(coerce_minutes(None), 0.0);
    }

    #[test]
    fn scalar_and_list_coercion_keep_usable_values() {
        assert_eq!(coerce_string(Some(json!(12))), "12");
        assert_eq!(coerce_string(Some(json!(null))), "");
        assert_eq!(
            coerce_string_list(Some(json!(["a", 1, null, {"x": 1}]))),
            vec!["a".to_string(), "1".to_string()]
        );
        assert_eq!(
            coerce_string_list(Some(json!("a, b"))),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
