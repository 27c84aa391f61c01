//! Cell value helpers.
//!
//! Cells carry [`serde_json::Value`]s so that presenters can decide how to
//! render non-string data. `Value::Null` is the absent value.

use serde_json::Value;

/// Converts a cell value to the text a presenter emits.
///
/// Strings are returned verbatim, `Null` becomes the empty string and any
/// other value uses its JSON text (`3`, `true`, `[1,2]`).
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Returns true for absent values and empty strings.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

pub(crate) fn label_is_blank(label: Option<&str>) -> bool {
    label.map_or(true, str::is_empty)
}
