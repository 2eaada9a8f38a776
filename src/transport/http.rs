//! reqwest-backed transport implementation.

use super::{Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::time::Duration;
use url::Url;

/// Default Pexels API host.
pub const DEFAULT_BASE_URL: &str = "https://api.pexels.com";

/// Builder for [`HttpTransport`].
///
/// Keep this surface small; operational knobs stay env-overridable like the
/// timeout and pool settings so deployments can tune them without code
/// changes.
pub struct HttpTransportBuilder {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Override the API host, primarily for tests against mock servers.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> crate::Result<HttpTransport> {
        let timeout_secs = env::var("PEXELS_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);
        let timeout = self.timeout.unwrap_or(Duration::from_secs(timeout_secs));

        let pool_max_idle = env::var("PEXELS_HTTP_POOL_MAX_IDLE_PER_HOST")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(16);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(pool_max_idle)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        let base_url = Url::parse(self.base_url.trim_end_matches('/'))
            .map_err(|e| crate::Error::Transport(TransportError::Other(format!("invalid base url: {e}"))))?;

        Ok(HttpTransport {
            client,
            base_url,
            api_key: self.api_key,
        })
    }
}

/// Concurrent HTTP transport over a shared reqwest connection pool.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl HttpTransport {
    pub fn new(api_key: impl Into<String>) -> crate::Result<Self> {
        HttpTransportBuilder::new(api_key).build()
    }

    pub fn builder(api_key: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder::new(api_key)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(
        &self,
        method: &str,
        path: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<TransportResponse, TransportError> {
        let url = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);

        let mut request = match method.to_uppercase().as_str() {
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            "DELETE" => self.client.delete(&url),
            _ => self.client.get(&url),
        };

        // Pexels expects the raw key in the Authorization header, no scheme.
        request = request.header("Authorization", &self.api_key);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(TransportError::Http)?;

        let status = response.status().as_u16();
        let mut header_map = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                header_map.insert(name.as_str().to_string(), value.to_string());
            }
        }

        let body = response.bytes().await.map_err(TransportError::Http)?;

        Ok(TransportResponse {
            status,
            headers: header_map,
            body,
        })
    }
}
