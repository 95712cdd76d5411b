//! reqwest-backed [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{ApiRequest, ApiResponse, HttpMethod, Transport};
use crate::config::ClientConfig;
use crate::error::LineResult;

/// Sends requests with a channel access token as the bearer credential.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    access_token: String,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), access_token)
    }

    /// Use a preconfigured HTTP client (proxies, TLS roots, pools).
    pub fn with_http_client(http: Client, access_token: impl Into<String>) -> Self {
        Self {
            http,
            access_token: access_token.into(),
            timeout: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> LineResult<Self> {
        let token = config.require_access_token()?;
        let mut transport = Self::new(token);
        transport.timeout = config.timeout_secs.map(Duration::from_secs);
        Ok(transport)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> LineResult<ApiResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "sending LINE API request");

        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(request.url),
            HttpMethod::Post => self.http.post(request.url),
            HttpMethod::Put => self.http.put(request.url),
            HttpMethod::Delete => self.http.delete(request.url),
        }
        .bearer_auth(&self.access_token);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await?;

        tracing::debug!(status, "LINE API response");
        Ok(ApiResponse { status, headers, body })
    }
}
