//! Logical operations and their batch wire encoding.

use serde::Serialize;
use serde_json::{Value, json};

use crate::types::{Endpoints, ObjectId};

/// One logical operation inside a batch.
///
/// Operations are built by callers and only consumed by the batch
/// executor; they are never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Filtered read against the class collection.
    Get { filter: Value },
    /// Direct read of a single object.
    GetById(ObjectId),
    /// Create a new object from the given body.
    Create(Value),
    /// Apply the given body to an existing object.
    Update(ObjectId, Value),
}

impl Operation {
    /// A filtered read matching records whose application-level `id` equals `id`.
    pub fn get_by_app_id(id: Value) -> Self {
        Operation::Get {
            filter: json!({ "id": id }),
        }
    }

    /// Returns the HTTP method of the sub-request.
    pub fn method(&self) -> &'static str {
        match self {
            Operation::Get { .. } | Operation::GetById(_) => "GET",
            Operation::Create(_) => "POST",
            Operation::Update(..) => "PUT",
        }
    }

    /// Returns true for operations that need the write session.
    pub fn is_write(&self) -> bool {
        matches!(self, Operation::Create(_) | Operation::Update(..))
    }

    /// Returns the server-relative path of the sub-request.
    pub fn path(&self, endpoints: &Endpoints) -> String {
        match self {
            Operation::Get { .. } | Operation::Create(_) => endpoints.class_path().to_string(),
            Operation::GetById(id) | Operation::Update(id, _) => endpoints.object_path(id),
        }
    }

    /// Encode the operation as a batch sub-request descriptor.
    pub fn sub_request<'a>(&'a self, endpoints: &Endpoints) -> SubRequest<'a> {
        let (params, body) = match self {
            Operation::Get { filter } => (Some(SubRequestParams { filter }), None),
            Operation::GetById(_) => (None, None),
            Operation::Create(body) | Operation::Update(_, body) => (None, Some(body)),
        };
        SubRequest {
            method: self.method(),
            path: self.path(endpoints),
            params,
            body,
        }
    }
}

/// Wire form of one operation: `{method, path, params | body}`.
#[derive(Debug, Serialize)]
pub struct SubRequest<'a> {
    pub method: &'static str,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<SubRequestParams<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<&'a Value>,
}

/// Query parameters of a filtered read sub-request.
#[derive(Debug, Serialize)]
pub struct SubRequestParams<'a> {
    #[serde(rename = "where")]
    pub filter: &'a Value,
}

/// The `{"requests": [...]}` envelope posted to the batch endpoint.
#[derive(Debug, Serialize)]
pub struct BatchRequest<'a> {
    pub requests: Vec<SubRequest<'a>>,
    #[serde(skip)]
    has_writes: bool,
}

impl<'a> BatchRequest<'a> {
    pub fn new(operations: &'a [Operation], endpoints: &Endpoints) -> Self {
        Self {
            requests: operations
                .iter()
                .map(|op| op.sub_request(endpoints))
                .collect(),
            has_writes: operations.iter().any(Operation::is_write),
        }
    }

    /// Returns true if any sub-request creates or updates an object.
    pub fn has_writes(&self) -> bool {
        self.has_writes
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ApiBase, ClassName};

    fn endpoints() -> Endpoints {
        Endpoints::new(
            &ApiBase::new("https://app.api.lncldglobal.com").unwrap(),
            &ClassName::new("Video").unwrap(),
        )
    }

    #[test]
    fn encodes_each_operation_kind() {
        let id = ObjectId::new("obj1").unwrap();
        let ops = vec![
            Operation::get_by_app_id(json!("v-1")),
            Operation::GetById(id.clone()),
            Operation::Create(json!({"title": "new"})),
            Operation::Update(id, json!({"title": "changed"})),
        ];
        let request = BatchRequest::new(&ops, &endpoints());
        assert!(request.has_writes());

        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(
            encoded,
            json!({
                "requests": [
                    {"method": "GET", "path": "/1.1/classes/Video", "params": {"where": {"id": "v-1"}}},
                    {"method": "GET", "path": "/1.1/classes/Video/obj1"},
                    {"method": "POST", "path": "/1.1/classes/Video", "body": {"title": "new"}},
                    {"method": "PUT", "path": "/1.1/classes/Video/obj1", "body": {"title": "changed"}}
                ]
            })
        );
    }

    #[test]
    fn read_only_batch_has_no_writes() {
        let ops = vec![Operation::GetById(ObjectId::new("a").unwrap())];
        assert!(!BatchRequest::new(&ops, &endpoints()).has_writes());
    }
}
