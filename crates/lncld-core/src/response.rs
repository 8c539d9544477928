//! Classification of raw response bodies.
//!
//! The API signals failure in the body rather than reliably through the
//! status code, so every response is classified by shape: a top-level
//! `error` field rejects the whole call, anything else must match what
//! the caller expects.

use serde_json::Value;

use crate::error::FailureKind;
use crate::record::kind_of;

/// Parse a response body as JSON.
pub fn parse_body(text: &str) -> Result<Value, FailureKind> {
    serde_json::from_str(text).map_err(|e| FailureKind::Malformed {
        reason: format!("response is not JSON: {}", e),
        body: text.to_string(),
    })
}

/// Returns the whole-call rejection carried by `body`, if any.
///
/// Only an object with a non-null `error` field counts; arrays never do.
pub fn rejection(body: &Value) -> Option<FailureKind> {
    let error = body.as_object()?.get("error")?;
    if error.is_null() {
        return None;
    }
    Some(FailureKind::Rejected {
        code: body.get("code").and_then(Value::as_i64),
        error: error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        body: body.to_string(),
    })
}

/// Extract the `results` list of a query or search envelope.
pub fn results(body: Value) -> Result<Vec<Value>, FailureKind> {
    if let Some(rejected) = rejection(&body) {
        return Err(rejected);
    }
    match body {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(FailureKind::Malformed {
                reason: format!("`results` is {}, expected an array", kind_of(&other)),
                body: Value::Object(map).to_string(),
            }),
            None => Err(FailureKind::Malformed {
                reason: "missing `results`".to_string(),
                body: Value::Object(map).to_string(),
            }),
        },
        other => Err(FailureKind::Malformed {
            reason: format!("expected an object, got {}", kind_of(&other)),
            body: other.to_string(),
        }),
    }
}
