//! HTTP transport shared by the upstream clients.

use crate::config::ClientConfig;
use crate::error::{SdkResult, UpstreamError};
use bytes::{Bytes, BytesMut};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Thin wrapper over `reqwest::Client`: one GET per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> SdkResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder().default_headers(headers);

        if let Some(ref user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if config.accept_invalid_certs {
            warn!(
                base_url = %config.base_url,
                "TLS certificate verification is disabled for this upstream"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;
        Ok(Self { client, config })
    }

    /// Build a URL for the given path, relative to the base URL.
    pub(crate) fn build_url(&self, path: &str) -> SdkResult<url::Url> {
        Ok(self.config.base_url.join(path.trim_start_matches('/'))?)
    }

    fn apply_basic_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.basic_auth {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        }
    }

    /// Send the request and turn any non-2xx status into an error.
    async fn execute(&self, request: RequestBuilder) -> SdkResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = self.read_body(response).await.unwrap_or_default();
        Err(UpstreamError::from_response(
            status.as_u16(),
            &String::from_utf8_lossy(&body),
        ))
    }

    /// GET an API path with query parameters and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> SdkResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        let request = self.apply_basic_auth(self.client.get(url).query(query));
        let response = self.execute(request).await?;
        let bytes = self.read_body(response).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET an absolute URL outside the API (no credentials) as text.
    pub async fn get_page(&self, url: &str) -> SdkResult<String> {
        let url = url::Url::parse(url)?;
        debug!(url = %url, "GET page");

        let request = self
            .client
            .get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml");
        let response = self.execute(request).await?;
        let bytes = self.read_body(response).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// GET an absolute URL outside the API (no credentials) as raw bytes,
    /// together with the response content type.
    pub async fn get_bytes(&self, url: &str) -> SdkResult<(Bytes, Option<String>)> {
        let url = url::Url::parse(url)?;
        debug!(url = %url, "GET bytes");

        let request = self.client.get(url).header(header::ACCEPT, "*/*");
        let response = self.execute(request).await?;
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok((self.read_body(response).await?, content_type))
    }

    /// Read the body chunk by chunk, stopping once it passes `max_body_bytes`.
    async fn read_body(&self, mut response: Response) -> SdkResult<Bytes> {
        let limit = self.config.max_body_bytes;
        if response.content_length().is_some_and(|len| len > limit as u64) {
            return Err(UpstreamError::TooLarge { limit });
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(UpstreamError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body.freeze())
    }
}
