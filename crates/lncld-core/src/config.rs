//! Client configuration.

use crate::credentials::{AppId, AppKey, SessionToken};
use crate::error::{ConfigError, Error};
use crate::types::{ApiBase, ClassName, Endpoints};

/// Immutable client configuration.
///
/// Built once and handed to a client at construction; nothing reads
/// process-wide state after that. The write session token is optional and
/// only checked when a batch carries a create or update.
///
/// # Example
///
/// ```
/// use lncld_core::{AppId, AppKey, ClassName, Config, SessionToken};
///
/// let config = Config::new(
///     AppId::new("myapp").unwrap(),
///     AppKey::new("key").unwrap(),
///     ClassName::new("Video").unwrap(),
/// )
/// .unwrap()
/// .with_session_token(SessionToken::new("r:session").unwrap());
///
/// assert_eq!(config.endpoints().batch(), "https://myapp.api.lncldglobal.com/1.1/batch");
/// assert!(config.session_token().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    app_id: AppId,
    app_key: AppKey,
    class: ClassName,
    session_token: Option<SessionToken>,
    endpoints: Endpoints,
}

impl Config {
    /// Create a configuration against the hosted API for `app_id`.
    pub fn new(app_id: AppId, app_key: AppKey, class: ClassName) -> Result<Self, Error> {
        let base = ApiBase::for_app(&app_id)?;
        let endpoints = Endpoints::new(&base, &class);
        Ok(Self {
            app_id,
            app_key,
            class,
            session_token: None,
            endpoints,
        })
    }

    /// Create a configuration from raw strings, validating each one.
    pub fn from_parts(app_id: &str, app_key: &str, class: &str) -> Result<Self, Error> {
        Self::new(AppId::new(app_id)?, AppKey::new(app_key)?, ClassName::new(class)?)
    }

    /// Attach the session token used for create and update operations.
    pub fn with_session_token(mut self, token: SessionToken) -> Self {
        self.session_token = Some(token);
        self
    }

    /// Talk to a different API host, re-resolving every endpoint.
    pub fn with_api_base(mut self, base: ApiBase) -> Self {
        self.endpoints = Endpoints::new(&base, &self.class);
        self
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    pub fn app_key(&self) -> &AppKey {
        &self.app_key
    }

    pub fn class(&self) -> &ClassName {
        &self.class
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn session_token(&self) -> Option<&SessionToken> {
        self.session_token.as_ref()
    }

    /// Returns the session token, or an error if writes are not configured.
    pub fn require_session_token(&self) -> Result<&SessionToken, ConfigError> {
        self.session_token.as_ref().ok_or(ConfigError::Missing {
            name: "session token",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_validates_every_field() {
        assert!(Config::from_parts("app", "key", "Video").is_ok());
        assert!(matches!(
            Config::from_parts("", "key", "Video"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_parts("app", "", "Video"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_parts("app", "key", ""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn api_base_override_reresolves_endpoints() {
        let config = Config::from_parts("app", "key", "Video")
            .unwrap()
            .with_api_base(ApiBase::new("http://localhost:9000").unwrap());
        assert_eq!(
            config.endpoints().collection(),
            "http://localhost:9000/1.1/classes/Video"
        );
    }

    #[test]
    fn session_token_required_for_writes() {
        let config = Config::from_parts("app", "key", "Video").unwrap();
        assert!(config.require_session_token().is_err());
        let config = config.with_session_token(SessionToken::new("tok").unwrap());
        assert_eq!(config.require_session_token().unwrap().as_str(), "tok");
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = Config::from_parts("app", "very-secret-key", "Video")
            .unwrap()
            .with_session_token(SessionToken::new("very-secret-session").unwrap());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("very-secret"));
    }
}
