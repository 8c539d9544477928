//! Record types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, InvalidInputError};

/// One row of the remote table.
///
/// Records are opaque JSON objects. The client only looks at `objectId`
/// (identity) and the handful of fields it builds queries against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create a record from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a JSON object.
    pub fn new(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(InvalidInputError::Record {
                reason: format!("expected a JSON object, got {}", kind_of(&other)),
            }
            .into()),
        }
    }

    /// Returns the server-assigned object id, if the record carries one.
    pub fn object_id(&self) -> Option<&str> {
        self.0.get("objectId").and_then(Value::as_str)
    }

    /// Get a field from the record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume and return the record as a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl TryFrom<Value> for Record {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

/// One page of records, in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordPage {
    pub records: Vec<Record>,
}

impl RecordPage {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Describe the JSON type of `value` for error messages, e.g. "an array".
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_of_names_json_types() {
        assert_eq!(kind_of(&json!([1])), "an array");
        assert_eq!(kind_of(&json!({})), "an object");
        assert_eq!(kind_of(&Value::Null), "null");
    }

    #[test]
    fn object_id_is_read_from_record() {
        let record = Record::new(json!({"objectId": "abc", "title": "t"})).unwrap();
        assert_eq!(record.object_id(), Some("abc"));
        assert_eq!(record.get("title"), Some(&json!("t")));
    }

    #[test]
    fn non_object_rejected() {
        let err = Record::new(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn serializes_transparently() {
        let record = Record::new(json!({"id": 7})).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"id": 7}));
    }
}
