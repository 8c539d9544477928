//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::credentials::AppId;
use crate::error::{ConfigError, Error};

/// Hosted API domain; the app id is prepended as the first host label.
const DEFAULT_API_DOMAIN: &str = "api.lncldglobal.com";

/// A validated API base URL.
///
/// Network URLs must use HTTPS (or HTTP for localhost). The base never ends
/// with a trailing slash, so endpoint paths can be appended directly.
///
/// # Example
///
/// ```
/// use lncld_core::{ApiBase, AppId};
///
/// let app = AppId::new("myapp").unwrap();
/// let base = ApiBase::for_app(&app).unwrap();
/// assert_eq!(base.join("/1.1/batch"), "https://myapp.api.lncldglobal.com/1.1/batch");
///
/// let local = ApiBase::new("http://localhost:3000/").unwrap();
/// assert_eq!(local.join("/1.1/batch"), "http://localhost:3000/1.1/batch");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiBase(Url);

impl ApiBase {
    /// Create a new API base from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s)
            .map_err(|e| ConfigError::invalid("API base URL", s, e.to_string()))?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the default hosted API base for an application.
    pub fn for_app(app_id: &AppId) -> Result<Self, Error> {
        Self::new(format!("https://{}.{}", app_id.as_str(), DEFAULT_API_DOMAIN))
    }

    /// Appends a server-relative path (starting with `/`) to the base.
    pub fn join(&self, path: &str) -> String {
        // The URL crate always adds a trailing slash to root paths
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}{}", base, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(
                ConfigError::invalid("API base URL", original, "must be an absolute URL").into(),
            );
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::invalid(
                "API base URL",
                original,
                "must not carry a query or fragment",
            )
            .into());
        }

        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(ConfigError::invalid(
                "API base URL",
                original,
                "must use HTTPS (HTTP allowed only for localhost)",
            )
            .into());
        }

        if url.host_str().is_none() {
            return Err(
                ConfigError::invalid("API base URL", original, "must have a host").into(),
            );
        }

        Ok(())
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiBase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiBase {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiBase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiBase::new(&s).map_err(serde::de::Error::custom)
    }
}
