//! Configuration types for the upstream clients.

use hearsay_core::config::{AppConfig, HttpConfig, DEFAULT_MAX_BODY_BYTES};
use hearsay_core::EventsCredentials;
use std::time::Duration;
use url::Url;

/// Configuration for one upstream client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the upstream API. Always ends with `/`.
    pub base_url: Url,
    /// User-Agent header sent with every request.
    pub user_agent: Option<String>,
    /// Request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// HTTP basic auth applied to API requests (not to page or image fetches).
    pub basic_auth: Option<EventsCredentials>,
    /// Skip TLS certificate verification. Never enabled by default.
    pub accept_invalid_certs: bool,
    /// Largest response body read before the request is abandoned.
    pub max_body_bytes: usize,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
            user_agent: None,
            timeout: None,
            basic_auth: None,
            accept_invalid_certs: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Reddit client settings from the application configuration.
    pub fn reddit(app: &AppConfig) -> Result<Self, url::ParseError> {
        let mut config = Self::new(Url::parse(&app.reddit.base_url)?).with_http(&app.http);
        config.user_agent = Some(app.reddit.user_agent.clone());
        Ok(config)
    }

    /// Events client settings from the application configuration.
    pub fn events(app: &AppConfig, credentials: EventsCredentials) -> Result<Self, url::ParseError> {
        let mut config = Self::new(Url::parse(&app.events.base_url)?).with_http(&app.http);
        config.user_agent = Some(app.reddit.user_agent.clone());
        config.basic_auth = Some(credentials);
        Ok(config)
    }

    fn with_http(mut self, http: &HttpConfig) -> Self {
        self.timeout = http.timeout_secs.map(Duration::from_secs);
        self.accept_invalid_certs = http.accept_invalid_certs;
        self.max_body_bytes = http.max_body_bytes;
        self
    }
}

/// `Url::join` drops the last path segment unless the base ends with `/`.
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
