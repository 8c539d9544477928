//! Error types for the lncld client.
//!
//! Whole-call failures are returned as [`Error`]. Per-item failures inside an
//! otherwise successful batch are data, not errors, and are reported through
//! [`OperationFailure`](crate::batch::OperationFailure) instead.

use std::fmt;
use thiserror::Error;

/// The unified error type for lncld operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration was missing or invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The batch endpoint rejected the whole call or answered with an unusable body.
    #[error("batch request failed: {0}")]
    BatchRequestFailed(RequestFailure),

    /// A filtered collection query was rejected.
    #[error("query failed: {0}")]
    QueryFailed(RequestFailure),

    /// A full-text search call was rejected.
    #[error("search failed: {0}")]
    SearchFailed(RequestFailure),

    /// Input validation errors (object ids, record bodies).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the request failure details for batch, query and search errors.
    pub fn request_failure(&self) -> Option<&RequestFailure> {
        match self {
            Error::BatchRequestFailed(f) | Error::QueryFailed(f) | Error::SearchFailed(f) => {
                Some(f)
            }
            _ => None,
        }
    }
}

/// Transport-level errors.
///
/// These are never retried or reclassified by the client; the message carries
/// whatever the HTTP stack reported.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error, including bodies that could not be read.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Configuration errors, raised when building a [`Config`](crate::Config)
/// or when a write is attempted without a session token.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value was not provided.
    #[error("missing required value: {name}")]
    Missing { name: &'static str },

    /// A value was provided but is not acceptable.
    #[error("invalid {name} '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid object id.
    #[error("invalid object id '{value}': {reason}")]
    ObjectId { value: String, reason: String },

    /// A record body that is not a JSON object.
    #[error("invalid record: {reason}")]
    Record { reason: String },

    /// A request body that could not be encoded.
    #[error("request could not be encoded: {reason}")]
    Request { reason: String },
}

/// Details of a rejected or unusable whole-call response.
#[derive(Debug)]
pub struct RequestFailure {
    /// The endpoint the request was sent to.
    pub endpoint: String,
    /// The serialized request (query string or JSON body).
    pub request: String,
    /// HTTP status code of the response.
    pub status: u16,
    /// What went wrong.
    pub kind: FailureKind,
}

/// Why a whole-call request failed.
#[derive(Debug)]
pub enum FailureKind {
    /// The server answered with a top-level `error` field.
    Rejected {
        code: Option<i64>,
        error: String,
        body: String,
    },
    /// The response body did not have the expected shape.
    Malformed { reason: String, body: String },
}

impl RequestFailure {
    pub fn new(
        endpoint: impl Into<String>,
        request: impl Into<String>,
        status: u16,
        kind: FailureKind,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            request: request.into(),
            status,
            kind,
        }
    }

    /// Returns true if the server explicitly rejected the call.
    pub fn is_rejected(&self) -> bool {
        matches!(self.kind, FailureKind::Rejected { .. })
    }

    /// Returns the raw response body.
    pub fn body(&self) -> &str {
        match &self.kind {
            FailureKind::Rejected { body, .. } | FailureKind::Malformed { body, .. } => body,
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} from {}", self.status, self.endpoint)?;
        match &self.kind {
            FailureKind::Rejected { code, error, .. } => {
                if let Some(code) = code {
                    write!(f, " [{}]", code)?;
                }
                write!(f, ": {}", error)?;
            }
            FailureKind::Malformed { reason, .. } => {
                write!(f, ": malformed response: {}", reason)?;
            }
        }
        write!(f, " (request: {}, body: {})", self.request, self.body())
    }
}

impl std::error::Error for RequestFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_includes_code_and_body() {
        let failure = RequestFailure::new(
            "https://app.api.lncldglobal.com/1.1/batch",
            r#"{"requests":[]}"#,
            401,
            FailureKind::Rejected {
                code: Some(401),
                error: "Unauthorized.".to_string(),
                body: r#"{"code":401,"error":"Unauthorized."}"#.to_string(),
            },
        );
        let text = Error::BatchRequestFailed(failure).to_string();
        assert!(text.starts_with("batch request failed: HTTP 401"));
        assert!(text.contains("[401]: Unauthorized."));
        assert!(text.contains(r#"body: {"code":401"#));
    }

    #[test]
    fn malformed_is_not_rejected() {
        let failure = RequestFailure::new(
            "https://x",
            "",
            200,
            FailureKind::Malformed {
                reason: "expected 2 items, got 1".to_string(),
                body: "[]".to_string(),
            },
        );
        assert!(!failure.is_rejected());
        assert_eq!(failure.body(), "[]");
        assert!(failure.to_string().contains("expected 2 items"));
    }

    #[test]
    fn request_failure_accessor() {
        let err = Error::SearchFailed(RequestFailure::new(
            "https://x",
            "q=1",
            400,
            FailureKind::Rejected {
                code: None,
                error: "bad".to_string(),
                body: "{}".to_string(),
            },
        ));
        assert!(err.request_failure().is_some_and(|f| f.is_rejected()));
        let err = Error::Config(ConfigError::Missing { name: "appId" });
        assert!(err.request_failure().is_none());
    }
}
