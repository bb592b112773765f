// Configuration shared by both binaries: upstream endpoints, events
// credentials and HTTP client settings. Loaded from TOML, credentials may be
// overridden from the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const EVENTS_USERNAME_ENV: &str = "EVENTS_API_USERNAME";
pub const EVENTS_PASSWORD_ENV: &str = "EVENTS_API_PASSWORD";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required credential: set {env} or events.{key} in the configuration file")]
    MissingCredential { key: &'static str, env: &'static str },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub reddit: RedditConfig,

    #[serde(default)]
    pub events: EventsConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    #[serde(default = "default_reddit_base_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_reddit_base_url() -> String {
    "https://www.reddit.com".to_string()
}

fn default_user_agent() -> String {
    format!("hearsay/{} (agent tool server)", env!("CARGO_PKG_VERSION"))
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            base_url: default_reddit_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    #[serde(default = "default_events_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Number of per-event detail lookups in flight at once
    #[serde(default = "default_detail_concurrency")]
    pub detail_concurrency: usize,
}

fn default_events_base_url() -> String {
    "https://api.eventfinda.co.nz/v2".to_string()
}

fn default_detail_concurrency() -> usize {
    4
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            base_url: default_events_base_url(),
            username: None,
            password: None,
            detail_concurrency: default_detail_concurrency(),
        }
    }
}

/// HTTP client settings applied to every upstream client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout. Unset means no client-side timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Skip TLS certificate verification for upstream requests. Off unless
    /// explicitly enabled; only meant for interception proxies in testing.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Largest response body read from any upstream, in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Default cap on upstream response bodies (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            accept_invalid_certs: false,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Username/password pair for the events API
#[derive(Clone, PartialEq, Eq)]
pub struct EventsCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for EventsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventsCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AppConfig {
    /// Load the configuration file if it exists (defaults otherwise) and
    /// apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
            Self::from_toml_str(&content)?
        } else {
            tracing::info!(path = %path.display(), "Configuration file not found, using defaults");
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Override credentials from the environment. `lookup` is
    /// `std::env::var` in production.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(username) = lookup(EVENTS_USERNAME_ENV).filter(|v| !v.is_empty()) {
            self.events.username = Some(username);
        }
        if let Some(password) = lookup(EVENTS_PASSWORD_ENV).filter(|v| !v.is_empty()) {
            self.events.password = Some(password);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.events.detail_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "events.detail_concurrency must be at least 1".to_string(),
            ));
        }
        if self.http.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "http.max_body_bytes must be at least 1".to_string(),
            ));
        }
        if self.http.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "http.timeout_secs must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Both events credentials, or the first missing one as an error.
    pub fn events_credentials(&self) -> Result<EventsCredentials, ConfigError> {
        let username = self
            .events
            .username
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingCredential {
                key: "username",
                env: EVENTS_USERNAME_ENV,
            })?;
        let password = self
            .events
            .password
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingCredential {
                key: "password",
                env: EVENTS_PASSWORD_ENV,
            })?;

        Ok(EventsCredentials { username, password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.reddit.base_url, "https://www.reddit.com");
        assert_eq!(config.events.detail_concurrency, 4);
        assert_eq!(config.http.timeout_secs, None);
        assert!(!config.http.accept_invalid_certs);
        assert_eq!(config.http.max_body_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [events]
            username = "me"
            password = "secret"

            [http]
            timeout_secs = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.events.base_url, "https://api.eventfinda.co.nz/v2");
        assert_eq!(config.http.timeout_secs, Some(15));
        assert_eq!(
            config.events_credentials().unwrap(),
            EventsCredentials {
                username: "me".to_string(),
                password: "secret".to_string()
            }
        );
    }

    #[test]
    fn test_missing_credentials() {
        let mut config = AppConfig::default();
        assert!(matches!(
            config.events_credentials(),
            Err(ConfigError::MissingCredential { key: "username", .. })
        ));

        config.events.username = Some("me".to_string());
        assert!(matches!(
            config.events_credentials(),
            Err(ConfigError::MissingCredential { key: "password", .. })
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = AppConfig::from_toml_str("[events]\nusername = \"file-user\"\n").unwrap();
        let env: HashMap<&str, &str> = [
            (EVENTS_USERNAME_ENV, "env-user"),
            (EVENTS_PASSWORD_ENV, "env-pass"),
        ]
        .into_iter()
        .collect();

        config.apply_env(|key| env.get(key).map(|v| v.to_string()));
        let creds = config.events_credentials().unwrap();
        assert_eq!(creds.username, "env-user");
        assert_eq!(creds.password, "env-pass");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hearsay.toml");
        std::fs::write(
            &path,
            "[reddit]\nbase_url = \"http://localhost:9000\"\n[http]\naccept_invalid_certs = true\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.reddit.base_url, "http://localhost:9000");
        assert!(config.http.accept_invalid_certs);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = AppConfig::from_toml_str("[events]\ndetail_concurrency = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = AppConfig::from_toml_str("[http]\ntimeout_secs = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str("[http]\nmax_body_bytes = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = EventsCredentials {
            username: "me".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
