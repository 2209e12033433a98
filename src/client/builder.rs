use std::path::Path;
use std::time::Duration;

use crate::protocol::ToolWireFormat;
use crate::transport::HttpTransport;
use crate::Result;

use super::config::{non_blank_key, ClientConfig, LocalRuntime};
use super::core::ChatClient;

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable (developer-friendly).
#[derive(Debug, Clone, Default)]
pub struct ChatClientBuilder {
    config: ClientConfig,
}

impl ChatClientBuilder {
    /// Hosted defaults, no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from environment configuration.
    pub fn from_env() -> Self {
        Self {
            config: ClientConfig::from_env(),
        }
    }

    /// Start from a YAML config file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            config: ClientConfig::from_yaml_file(path)?,
        })
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Target a local runtime with its placeholder credential.
    pub fn local(mut self, runtime: LocalRuntime) -> Self {
        self.config.base_url = runtime.base_url().to_string();
        self.config.api_key = Some(runtime.placeholder_key().to_string());
        self
    }

    /// Override the base URL (self-hosted endpoints, mock servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the bearer credential. A blank key leaves the client without one.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = non_blank_key(api_key.into());
        self
    }

    /// Total per-request timeout; expiry surfaces as `EndpointUnreachable`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy_url.into());
        self
    }

    pub fn tool_wire_format(mut self, format: ToolWireFormat) -> Self {
        self.config.tool_format = format;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ChatClient> {
        self.config.validate()?;
        let transport = HttpTransport::new(&self.config)?;
        tracing::debug!(config = ?self.config, "chat client built");
        Ok(ChatClient {
            config: self.config,
            transport,
        })
    }
}
