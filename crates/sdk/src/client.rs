//! Builder for the upstream clients.

use crate::api::{EventsClient, RedditClient};
use crate::config::ClientConfig;
use crate::error::{SdkResult, UpstreamError};
use crate::transport::HttpTransport;
use hearsay_core::{AppConfig, EventsCredentials};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builder for creating a `RedditClient` or an `EventsClient`.
pub struct ClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    basic_auth: Option<EventsCredentials>,
    accept_invalid_certs: bool,
    max_body_bytes: Option<usize>,
}

impl ClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            timeout: None,
            basic_auth: None,
            accept_invalid_certs: false,
            max_body_bytes: None,
        }
    }

    /// Set the base URL of the upstream API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the request timeout. Without one, requests wait indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set HTTP basic auth credentials for API requests.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some(EventsCredentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Disable TLS certificate verification.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Cap the size of any response body read by the client.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }

    fn into_config(self) -> SdkResult<ClientConfig> {
        let base_url_str = self
            .base_url
            .ok_or_else(|| UpstreamError::Config("base_url is required".to_string()))?;

        let mut config = ClientConfig::new(Url::parse(&base_url_str)?);
        config.user_agent = self.user_agent;
        config.timeout = self.timeout;
        config.basic_auth = self.basic_auth;
        config.accept_invalid_certs = self.accept_invalid_certs;
        if let Some(limit) = self.max_body_bytes {
            config.max_body_bytes = limit;
        }
        Ok(config)
    }

    /// Build a Reddit client.
    pub fn reddit(self) -> SdkResult<RedditClient> {
        let config = self.into_config()?;
        Ok(RedditClient::new(HttpTransport::new(Arc::new(config))?))
    }

    /// Build an events client. Basic auth credentials are required.
    pub fn events(self) -> SdkResult<EventsClient> {
        let config = self.into_config()?;
        if config.basic_auth.is_none() {
            return Err(UpstreamError::Config(
                "events client requires basic auth credentials".to_string(),
            ));
        }
        Ok(EventsClient::new(HttpTransport::new(Arc::new(config))?))
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RedditClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Client configured from the application configuration.
    pub fn from_app_config(app: &AppConfig) -> SdkResult<Self> {
        let config = ClientConfig::reddit(app)?;
        Ok(Self::new(HttpTransport::new(Arc::new(config))?))
    }
}

impl EventsClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Client configured from the application configuration. Fails when
    /// either credential is missing.
    pub fn from_app_config(app: &AppConfig) -> SdkResult<Self> {
        let credentials = app
            .events_credentials()
            .map_err(|e| UpstreamError::Config(e.to_string()))?;
        let config = ClientConfig::events(app, credentials)?;
        Ok(Self::new(HttpTransport::new(Arc::new(config))?))
    }
}
