//! Application credentials and the write session token.

use std::fmt;

use crate::error::ConfigError;

/// The application identifier.
///
/// Interpolated into the API host name, so it is restricted to ASCII
/// alphanumerics and `-`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AppId(String);

impl AppId {
    /// Create a new application id, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or contains characters that
    /// are not allowed in a host label.
    pub fn new(s: impl Into<String>) -> Result<Self, ConfigError> {
        let s = s.into();
        if s.is_empty() {
            return Err(ConfigError::Missing { name: "app id" });
        }
        if let Some(c) = s.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
            return Err(ConfigError::invalid(
                "app id",
                &s,
                format!("invalid character '{}'", c),
            ));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The application key sent with every request.
///
/// # Security
///
/// Never shown in Debug output.
#[derive(Clone)]
pub struct AppKey(String);

impl AppKey {
    /// Create a new application key.
    pub fn new(s: impl Into<String>) -> Result<Self, ConfigError> {
        let s = s.into();
        if s.is_empty() {
            return Err(ConfigError::Missing { name: "app key" });
        }
        Ok(Self(s))
    }

    /// Returns the key for use in request headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AppKey").field(&"[REDACTED]").finish()
    }
}

/// A user session token authorizing create and update operations.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(s: impl Into<String>) -> Result<Self, ConfigError> {
        let s = s.into();
        if s.is_empty() {
            return Err(ConfigError::Missing {
                name: "session token",
            });
        }
        Ok(Self(s))
    }

    /// Returns the token for use in the session header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_id_accepts_host_label_characters() {
        let id = AppId::new("aBc123-gzGzoHsz").unwrap();
        assert_eq!(id.as_str(), "aBc123-gzGzoHsz");
    }

    #[test]
    fn app_id_rejects_empty_and_dots() {
        assert!(matches!(AppId::new(""), Err(ConfigError::Missing { .. })));
        assert!(matches!(
            AppId::new("evil.example.com"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn secrets_hidden_in_debug() {
        let key = AppKey::new("super-secret").unwrap();
        let token = SessionToken::new("session-secret").unwrap();
        let debug = format!("{:?} {:?}", key, token);
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("session-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn empty_secrets_rejected() {
        assert!(AppKey::new("").is_err());
        assert!(SessionToken::new("").is_err());
    }
}
