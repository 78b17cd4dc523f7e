//! Response envelope normalization
//!
//! The backend answers either with a flat object (`{ movies, total, .. }`,
//! `{ movie, message }`) or with a wrapped one
//! (`{ success, statusCode, message, data: { .. } }`). Both are reduced here
//! to the flat payload, once, before any caller sees the body.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// JavaScript-style truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reduce a response body to its payload
///
/// A truthy `success` with a present `data` wins. Otherwise the body is
/// returned as is when one of `expected` sits at the top level.
pub fn unwrap(body: Value, expected: &[&str]) -> ClientResult<Value> {
    if body.get("success").is_some_and(is_truthy) {
        if let Some(data) = body.get("data").filter(|data| !data.is_null()) {
            return Ok(data.clone());
        }
    }

    if expected.iter().any(|field| body.get(*field).is_some()) {
        return Ok(body);
    }

    Err(ClientError::UnexpectedResponse {
        expected: expected.iter().map(|f| f.to_string()).collect(),
    })
}

/// Unwrap and decode into a typed payload
pub fn decode<T: DeserializeOwned>(body: Value, expected: &[&str]) -> ClientResult<T> {
    let payload = unwrap(body, expected)?;
    serde_json::from_value(payload).map_err(ClientError::Decode)
}
