//! Per-item batch outcomes and response reconciliation.

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FailureKind;
use crate::record::{Record, kind_of};
use crate::response::rejection;

/// Per-item failure marker.
///
/// Carried inside an otherwise successful response. It never aborts
/// processing of sibling items.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationFailure {
    /// The server reported an error for this item. `raw` is the element
    /// exactly as received, kept for diagnostics.
    Rejected {
        code: Option<i64>,
        message: Option<String>,
        raw: Value,
    },
    /// The operation succeeded but matched no record.
    NotFound,
    /// The item's payload did not have the expected shape.
    Malformed { reason: String, raw: Value },
}

impl fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationFailure::Rejected { code, message, .. } => {
                write!(f, "rejected")?;
                if let Some(code) = code {
                    write!(f, " [{}]", code)?;
                }
                if let Some(message) = message {
                    write!(f, ": {}", message)?;
                }
                Ok(())
            }
            OperationFailure::NotFound => write!(f, "no matching record"),
            OperationFailure::Malformed { reason, .. } => write!(f, "malformed item: {}", reason),
        }
    }
}

impl std::error::Error for OperationFailure {}

impl OperationFailure {
    fn from_element(raw: Value) -> Self {
        // Items look like {"error": {"code": 101, "error": "Object not found."}}
        let detail = raw.get("error");
        let code = detail
            .and_then(|d| d.get("code"))
            .or_else(|| raw.get("code"))
            .and_then(Value::as_i64);
        let message = match detail {
            Some(Value::String(s)) => Some(s.clone()),
            Some(d) => d.get("error").and_then(Value::as_str).map(str::to_string),
            None => None,
        };
        OperationFailure::Rejected { code, message, raw }
    }
}

/// Outcome of one item: a success value or a failure marker.
pub type Outcome<T> = Result<T, OperationFailure>;

/// Outcome of one batch sub-request, payload left opaque.
pub type BatchOutcome = Outcome<Value>;

/// Reconcile a batch response body into positional outcomes.
///
/// `outcomes[i]` answers the `i`th submitted operation. A top-level
/// `error` object rejects the whole call; a body that is not an array of
/// exactly `expected` elements is malformed.
pub fn reconcile(body: Value, expected: usize) -> Result<Vec<BatchOutcome>, FailureKind> {
    if let Some(rejected) = rejection(&body) {
        return Err(rejected);
    }

    let items = match body {
        Value::Array(items) => items,
        other => {
            return Err(FailureKind::Malformed {
                reason: format!("expected an array, got {}", kind_of(&other)),
                body: other.to_string(),
            });
        }
    };

    if items.len() != expected {
        return Err(FailureKind::Malformed {
            reason: format!("expected {} items, got {}", expected, items.len()),
            body: Value::Array(items).to_string(),
        });
    }

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(mut map) if map.contains_key("success") => {
                Ok(map.remove("success").unwrap_or(Value::Null))
            }
            other => {
                debug!(index, item = %other, "batch item failed");
                Err(OperationFailure::from_element(other))
            }
        })
        .collect())
}

/// Unwrap a filtered-read outcome to its single matching record.
///
/// A filter on a unique field matches at most one record, so only the
/// first element of `results` is kept. An empty list is
/// [`OperationFailure::NotFound`].
pub fn first_result(outcome: BatchOutcome) -> Outcome<Record> {
    let payload = outcome?;
    let first = match payload.get("results") {
        Some(Value::Array(results)) => {
            if results.len() > 1 {
                warn!(
                    matched = results.len(),
                    "filtered read matched several records, keeping the first"
                );
            }
            results.first().cloned()
        }
        _ => {
            return Err(OperationFailure::Malformed {
                reason: "missing `results` array".to_string(),
                raw: payload,
            });
        }
    };
    match first {
        Some(value) => into_record(value),
        None => Err(OperationFailure::NotFound),
    }
}

/// Convert a success payload that is itself a record.
pub fn into_record(value: Value) -> Outcome<Record> {
    match value {
        Value::Object(map) => Ok(Record::from(map)),
        other => Err(OperationFailure::Malformed {
            reason: format!("expected a record object, got {}", kind_of(&other)),
            raw: other,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failures_stay_in_position() {
        let body = json!([
            {"success": {"objectId": "a"}},
            {"error": {"code": 101, "error": "Object not found."}},
            {"success": {"objectId": "c"}},
            {"unexpected": true},
            {"success": null}
        ]);
        let outcomes = reconcile(body, 5).unwrap();
        assert_eq!(outcomes.len(), 5);
        assert_eq!(outcomes[0], Ok(json!({"objectId": "a"})));
        match &outcomes[1] {
            Err(OperationFailure::Rejected { code, message, raw }) => {
                assert_eq!(*code, Some(101));
                assert_eq!(message.as_deref(), Some("Object not found."));
                assert_eq!(raw["error"]["code"], 101);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(outcomes[2], Ok(json!({"objectId": "c"})));
        assert!(matches!(
            outcomes[3],
            Err(OperationFailure::Rejected { code: None, .. })
        ));
        assert_eq!(outcomes[4], Ok(Value::Null));
    }

    #[test]
    fn top_level_error_rejects_whole_call() {
        let body = json!({"code": 401, "error": "Unauthorized."});
        assert!(matches!(
            reconcile(body, 3),
            Err(FailureKind::Rejected { code: Some(401), .. })
        ));
    }

    #[test]
    fn length_mismatch_is_malformed() {
        let body = json!([{"success": {}}]);
        match reconcile(body, 2) {
            Err(FailureKind::Malformed { reason, .. }) => {
                assert_eq!(reason, "expected 2 items, got 1")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_array_is_malformed() {
        assert!(matches!(
            reconcile(json!({"results": []}), 0),
            Err(FailureKind::Malformed { .. })
        ));
    }

    #[test]
    fn first_result_unwraps_single_match() {
        let record = first_result(Ok(json!({"results": [{"id": 1}, {"id": 2}]}))).unwrap();
        assert_eq!(record.get("id"), Some(&json!(1)));
    }

    #[test]
    fn first_result_of_empty_list_is_not_found() {
        assert_eq!(
            first_result(Ok(json!({"results": []}))),
            Err(OperationFailure::NotFound)
        );
    }

    #[test]
    fn first_result_passes_failures_through() {
        assert_eq!(
            first_result(Err(OperationFailure::NotFound)),
            Err(OperationFailure::NotFound)
        );
        assert!(matches!(
            first_result(Ok(json!({"count": 0}))),
            Err(OperationFailure::Malformed { .. })
        ));
    }
}
