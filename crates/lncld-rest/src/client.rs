//! HTTP client wrapper.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, instrument, trace};

use lncld_core::error::{ConfigError, Error, TransportError};
use lncld_core::{Config, SessionToken};

/// Application id header.
pub(crate) const APP_ID_HEADER: &str = "x-lc-id";

/// Application key header.
pub(crate) const APP_KEY_HEADER: &str = "x-lc-key";

/// Write session header, sent on batches that create or update.
pub(crate) const SESSION_HEADER: &str = "x-lc-session";

/// A response whose body has been read but not yet interpreted.
#[derive(Debug)]
pub(crate) struct RawResponse {
    /// Final request URL, including the query string.
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// HTTP client carrying the application headers.
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    client: reqwest::Client,
    app_headers: HeaderMap,
}

impl RestClient {
    /// Create a client for the given configuration.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lncld/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;

        Self::with_client(client, config)
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client, config: &Config) -> Result<Self, Error> {
        Ok(Self {
            client,
            app_headers: Self::app_headers(config)?,
        })
    }

    /// Send a GET with query parameters.
    #[instrument(skip(self, headers))]
    pub async fn get(
        &self,
        url: &str,
        params: &[(&'static str, String)],
        headers: HeaderMap,
    ) -> Result<RawResponse, Error> {
        debug!("GET");
        let response = self
            .client
            .get(url)
            .query(params)
            .headers(self.app_headers.clone())
            .headers(headers)
            .send()
            .await
            .map_err(transport)?;

        Self::read(response).await
    }

    /// Send a POST with an already encoded JSON body.
    #[instrument(skip(self, body, headers), fields(bytes = body.len()))]
    pub async fn post(
        &self,
        url: &str,
        body: String,
        headers: HeaderMap,
    ) -> Result<RawResponse, Error> {
        debug!("POST");
        let response = self
            .client
            .post(url)
            .body(body)
            .headers(self.app_headers.clone())
            .headers(headers)
            .send()
            .await
            .map_err(transport)?;

        Self::read(response).await
    }

    /// Headers sent with every request.
    pub fn app_headers(config: &Config) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(APP_ID_HEADER),
            header_value("app id", config.app_id().as_str())?,
        );
        headers.insert(
            HeaderName::from_static(APP_KEY_HEADER),
            header_value("app key", config.app_key().as_str())?,
        );
        Ok(headers)
    }

    /// Header carrying the write session.
    pub fn session_headers(token: &SessionToken) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(SESSION_HEADER),
            header_value("session token", token.as_str())?,
        );
        Ok(headers)
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse, Error> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await.map_err(transport)?;
        trace!(status, %url, body = %body, "response");
        Ok(RawResponse { url, status, body })
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, Error> {
    let mut header = HeaderValue::from_str(value).map_err(|e| ConfigError::Invalid {
        name,
        value: "[REDACTED]".to_string(),
        reason: e.to_string(),
    })?;
    header.set_sensitive(name != "app id");
    Ok(header)
}

/// Map a reqwest failure onto the transport error taxonomy.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let err = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_parts("myapp", "mykey", "Video").unwrap()
    }

    #[test]
    fn app_headers_carry_credentials() {
        let headers = RestClient::app_headers(&config()).unwrap();
        assert_eq!(headers[APP_ID_HEADER], "myapp");
        assert_eq!(headers[APP_KEY_HEADER], "mykey");
        assert!(headers[APP_KEY_HEADER].is_sensitive());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn invalid_header_value_is_config_error() {
        let config = Config::from_parts("myapp", "bad\nkey", "Video").unwrap();
        let err = RestClient::app_headers(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(!err.to_string().contains("bad\nkey"));
    }

    #[test]
    fn client_creation() {
        assert!(RestClient::new(&config()).is_ok());
    }
}
