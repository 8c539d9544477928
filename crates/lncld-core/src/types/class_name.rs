//! Class (table) name type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A validated class name, i.e. the remote table records live in.
///
/// Class names start with an ASCII letter followed by ASCII alphanumerics
/// or underscores. They are interpolated into endpoint paths unescaped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName(String);

impl ClassName {
    /// Create a new class name, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, ConfigError> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), ConfigError> {
        let mut chars = s.chars();
        let Some(first) = chars.next() else {
            return Err(ConfigError::Missing { name: "class name" });
        };

        if !first.is_ascii_alphabetic() {
            return Err(ConfigError::invalid(
                "class name",
                s,
                "must start with a letter",
            ));
        }

        if let Some(c) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(ConfigError::invalid(
                "class name",
                s,
                format!("invalid character '{}'", c),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ClassName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ClassName {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ClassName> for String {
    fn from(name: ClassName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(ClassName::new("Video").is_ok());
        assert!(ClassName::new("video_items2").is_ok());
    }

    #[test]
    fn invalid_names() {
        assert!(matches!(
            ClassName::new(""),
            Err(ConfigError::Missing { .. })
        ));
        assert!(ClassName::new("2videos").is_err());
        assert!(ClassName::new("_User").is_err());
        assert!(ClassName::new("videos/1").is_err());
        assert!(ClassName::new("a b").is_err());
    }

    #[test]
    fn serde_validates() {
        let name: ClassName = serde_json::from_str("\"Video\"").unwrap();
        assert_eq!(name.as_str(), "Video");
        assert!(serde_json::from_str::<ClassName>("\"bad/name\"").is_err());
    }
}
