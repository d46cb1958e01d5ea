//! Request-body construction helpers.
//!
//! Pure functions that turn a structured payload into the JSON object the
//! transport sends, and check declared required fields before any network
//! call is attempted.

use serde::Serialize;
use serde_json::Value;

use crate::queryable::errors::ValidationError;

/// Serializes a payload into a JSON object body.
///
/// # Errors
///
/// Returns [`ValidationError::Serialize`] if serialization fails and
/// [`ValidationError::NotAnObject`] if the payload serializes to anything
/// other than a JSON object.
pub fn request_body<T: Serialize>(
    resource: &'static str,
    payload: &T,
) -> Result<Value, ValidationError> {
    let body = serde_json::to_value(payload).map_err(|error| ValidationError::Serialize {
        resource,
        message: error.to_string(),
    })?;

    if body.is_object() {
        Ok(body)
    } else {
        Err(ValidationError::NotAnObject { resource })
    }
}

/// Checks that every declared required field is present and non-empty.
///
/// A field counts as missing when it is absent, `null`, or an empty string.
///
/// # Errors
///
/// Returns [`ValidationError::MissingRequiredFields`] naming every missing
/// field, or [`ValidationError::NotAnObject`] if the body is not an object.
pub fn ensure_required_fields(
    resource: &'static str,
    body: &Value,
    required: &[&'static str],
) -> Result<(), ValidationError> {
    let Some(map) = body.as_object() else {
        return Err(ValidationError::NotAnObject { resource });
    };

    let missing: Vec<String> = required
        .iter()
        .filter(|field| {
            !map.get(**field)
                .is_some_and(|value| !value.is_null() && value.as_str() != Some(""))
        })
        .map(|field| (*field).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingRequiredFields { resource, missing })
    }
}
