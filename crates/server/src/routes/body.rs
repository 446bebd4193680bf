//! Lenient JSON body handling.
//!
//! The tracking UI posts small JSON objects and is loose about types, so
//! bodies are read as a raw JSON object and individual fields are coerced
//! rather than deserialized into strict structs.

use axum::body::Bytes;
use serde_json::{Map, Value};

use crate::error::AppError;

/// A parsed JSON object body.
pub type JsonObject = Map<String, Value>;

/// Message for any body that is not a JSON object.
pub const INVALID_JSON: &str = "Invalid JSON";

/// Parse a request body as a JSON object.
///
/// An empty body is treated as `{}`.
///
/// # Errors
///
/// Returns `AppError::BadRequest("Invalid JSON")` if the body is not valid
/// JSON or is valid JSON but not an object.
pub fn parse_object(body: &Bytes) -> Result<JsonObject, AppError> {
    if body.is_empty() {
        return Ok(JsonObject::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(AppError::BadRequest(INVALID_JSON.to_string())),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected malformed JSON body");
            Err(AppError::BadRequest(INVALID_JSON.to_string()))
        }
    }
}

/// Read `key` as text: strings as-is, absent or `null` as empty, any other
/// value as its JSON text.
#[must_use]
pub fn text_field(object: &JsonObject, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read `key` as a flag using truthiness: zero, empty and `null` are false.
#[must_use]
pub fn flag_field(object: &JsonObject, key: &str) -> bool {
    object.get(key).is_some_and(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
