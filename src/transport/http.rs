use crate::client::config::ClientConfig;
use crate::{Error, ErrorContext, Result};
use reqwest::header::HeaderMap;
use reqwest::Proxy;
use serde::Serialize;
use std::time::Duration;

/// Raw reply from a single POST.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
    /// Upstream correlation id, if the server sent one.
    pub upstream_request_id: Option<String>,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Thin wrapper over a pooled `reqwest::Client` bound to one base URL.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout.min(config.timeout))
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = &config.proxy {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid proxy url: {}", e),
                    ErrorContext::new()
                        .with_field_path("config.proxy")
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            Error::configuration_with_context(
                format!("failed to build HTTP client: {}", e),
                ErrorContext::new().with_source("http_transport"),
            )
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map_or(false, |key| !key.trim().is_empty())
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one JSON POST and read the full body. No retries.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        client_request_id: &str,
    ) -> Result<HttpReply> {
        let url = self.url_for(path);

        let mut req = self
            .client
            .post(&url)
            .json(body)
            .header("accept", "application/json")
            .header("x-request-id", client_request_id);

        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await.map_err(|e| self.unreachable(&url, e))?;

        let status = resp.status().as_u16();
        let upstream_request_id =
            header_first(resp.headers(), &["x-request-id", "request-id", "cf-ray"]);
        let body = resp.text().await.map_err(|e| self.unreachable(&url, e))?;

        Ok(HttpReply {
            status,
            body,
            upstream_request_id,
        })
    }

    fn unreachable(&self, url: &str, e: reqwest::Error) -> Error {
        let reason = if e.is_timeout() {
            format!("request timed out after {}ms", self.timeout.as_millis())
        } else if e.is_connect() {
            format!("connection failed: {}", e)
        } else {
            e.to_string()
        };
        Error::EndpointUnreachable {
            endpoint: url.to_string(),
            reason,
        }
    }
}

fn header_first(headers: &HeaderMap, names: &[&str]) -> Option<String> {
    for name in names {
        if let Some(v) = headers.get(*name) {
            if let Ok(s) = v.to_str() {
                let s = s.trim();
                if !s.is_empty() {
                    return Some(s.to_string());
                }
            }
        }
    }
    None
}
