//! Structural validation of decoded completion responses
//!
//! The model's reply is untrusted free-form JSON. This module checks that it
//! is an array of objects carrying numeric `x`, `y` and `deltaTime` fields
//! and converts it into typed [`PathPoint`]s. Validation stops at the first
//! violation and the error message names the offending path, e.g.
//! `[2].deltaTime`. Unknown extra keys on point objects are ignored.

use serde_json::Value;

use crate::error::{CursorweaveError, Result};
use crate::types::PathPoint;

/// Validates a decoded JSON value as an array of path points.
///
/// No side effects; the input value is never mutated.
pub fn validate_points(value: &Value) -> Result<Vec<PathPoint>> {
    let items = value
        .as_array()
        .ok_or_else(|| schema_error(format!("expected an array, got {}", kind_of(value))))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_point(index, item))
        .collect()
}

fn validate_point(index: usize, item: &Value) -> Result<PathPoint> {
    let object = item
        .as_object()
        .ok_or_else(|| schema_error(format!("[{index}]: expected an object, got {}", kind_of(item))))?;

    Ok(PathPoint {
        x: number_field(object, index, "x")?,
        y: number_field(object, index, "y")?,
        delta_time: number_field(object, index, "deltaTime")?,
    })
}

fn number_field(
    object: &serde_json::Map<String, Value>,
    index: usize,
    key: &str,
) -> Result<f64> {
    let value = object
        .get(key)
        .ok_or_else(|| schema_error(format!("[{index}].{key}: missing required field")))?;

    value
        .as_f64()
        .ok_or_else(|| schema_error(format!("[{index}].{key}: expected a number, got {}", kind_of(value))))
}

fn schema_error(message: String) -> CursorweaveError {
    CursorweaveError::SchemaValidation(message)
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
