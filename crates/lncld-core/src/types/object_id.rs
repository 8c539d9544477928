//! Object id type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A server-assigned object id.
///
/// Distinct from any application-level `id` field a record may carry.
/// Object ids are used as a path segment, so only ASCII alphanumerics,
/// `-` and `_` are accepted.
///
/// # Example
///
/// ```
/// use lncld_core::ObjectId;
///
/// let id = ObjectId::new("5f1a2b3c4d5e6f7a8b9c0d1e").unwrap();
/// assert_eq!(id.as_str(), "5f1a2b3c4d5e6f7a8b9c0d1e");
/// assert!(ObjectId::new("../batch").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Create a new object id, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.is_empty() {
            return Err(InvalidInputError::ObjectId {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(InvalidInputError::ObjectId {
                value: s.to_string(),
                reason: format!("invalid character '{}'", c),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
