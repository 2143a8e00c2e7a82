//! Normalization of the platform's undocumented payloads.
//!
//! Payloads fail as a whole only when they are not structured data at all.
//! Individual entries missing a required field are dropped.

mod assignments;
mod courses;

pub use assignments::{normalize_assignments, AssignmentRecord};
pub use courses::{normalize_courses, CourseRecord};

use crate::error::{Result, SchoologyError};
use serde_json::{Map, Value};

/// Parse a raw body into JSON, rejecting bare scalars.
fn parse_payload(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| SchoologyError::Parse(format!("payload is not valid JSON: {}", e)))?;

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(SchoologyError::Parse(format!(
            "expected a JSON object or array, got {}",
            kind_of(&other)
        ))),
    }
}

/// An entry of a collection, with its map key when the collection is keyed.
type Entry<'a> = (Option<&'a str>, &'a Value);

/// Flatten an object or array into entries, in source order.
fn collection_entries<'a>(value: &'a Value, what: &str) -> Result<Vec<Entry<'a>>> {
    match value {
        Value::Object(map) => Ok(map.iter().map(|(k, v)| (Some(k.as_str()), v)).collect()),
        Value::Array(items) => Ok(items.iter().map(|v| (None, v)).collect()),
        other => Err(SchoologyError::Parse(format!(
            "expected {} to be an object or array, got {}",
            what,
            kind_of(other)
        ))),
    }
}

/// First non-empty text among `keys`. Numbers are rendered as text.
fn text_field(entry: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| entry.get(*key))
        .find_map(value_text)
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
