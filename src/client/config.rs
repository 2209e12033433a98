//! Client configuration: base URL, credential, timeouts.
//!
//! Sources, in the order a caller usually layers them:
//! - explicit builder calls
//! - YAML files (`ClientConfig::from_yaml_file`)
//! - environment (`ClientConfig::from_env`):
//!   - `OPENAI_BASE_URL`
//!   - `OPENAI_API_KEY`; an OS keyring entry `ai-lib-chat` / `openai`, when present,
//!     takes precedence over it
//!   - `AI_HTTP_TIMEOUT_SECS` / `AI_TIMEOUT_SECS`
//!   - `AI_PROXY_URL`
//!   - `AI_TOOL_WIRE_FORMAT` (`tools` | `functions`)

use keyring::Entry;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::protocol::ToolWireFormat;
use crate::{Error, ErrorContext, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const KEYRING_SERVICE: &str = "ai-lib-chat";
const KEYRING_USER: &str = "openai";

/// Locally hosted OpenAI-compatible runtimes.
///
/// These servers ignore the credential, but the client still sends a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalRuntime {
    Ollama,
    Vllm,
}

impl LocalRuntime {
    pub fn base_url(&self) -> &'static str {
        match self {
            LocalRuntime::Ollama => "http://localhost:11434/v1",
            LocalRuntime::Vllm => "http://localhost:8000/v1",
        }
    }

    pub fn placeholder_key(&self) -> &'static str {
        match self {
            LocalRuntime::Ollama => "ollama",
            LocalRuntime::Vllm => "dummy",
        }
    }
}

/// Immutable connection configuration shared by every call of a client.
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub proxy: Option<String>,
    pub tool_format: ToolWireFormat,
}

// Hand-written so the credential never ends up in logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("proxy", &self.proxy)
            .field("tool_format", &self.tool_format)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            proxy: None,
            tool_format: ToolWireFormat::default(),
        }
    }

    /// Preset for a local runtime, including its placeholder credential.
    pub fn local(runtime: LocalRuntime) -> Self {
        let mut cfg = Self::new(runtime.base_url());
        cfg.api_key = Some(runtime.placeholder_key().to_string());
        cfg
    }

    /// Load from process environment, consulting the OS keyring for the credential.
    pub fn from_env() -> Self {
        let mut cfg = Self::from_lookup(|k| std::env::var(k).ok());
        if let Some(key) = keyring_api_key() {
            cfg.api_key = Some(key);
        }
        cfg
    }

    /// Load from an arbitrary key lookup (environment-shaped).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut cfg = Self::new(non_empty("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()));
        cfg.api_key = non_empty("OPENAI_API_KEY");
        if let Some(secs) = non_empty("AI_HTTP_TIMEOUT_SECS")
            .or_else(|| non_empty("AI_TIMEOUT_SECS"))
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
        {
            cfg.timeout = Duration::from_secs(secs);
        }
        cfg.proxy = non_empty("AI_PROXY_URL");
        if let Some(format) = non_empty("AI_TOOL_WIRE_FORMAT").and_then(|s| s.parse().ok()) {
            cfg.tool_format = format;
        }
        cfg
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("failed to read config file: {}", e),
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("config_loader"),
            )
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Parse a YAML document.
    ///
    /// ```yaml
    /// base_url: http://localhost:8000/v1
    /// api_key_env: VLLM_API_KEY
    /// timeout_secs: 120
    /// tool_format: functions
    /// ```
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let file: FileConfig = serde_yaml::from_str(raw).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid config yaml: {}", e),
                ErrorContext::new().with_source("config_loader"),
            )
        })?;

        let mut cfg = match file.local_runtime {
            Some(runtime) => Self::local(runtime),
            None => Self::default(),
        };
        if let Some(url) = file.base_url {
            cfg.base_url = url;
        }
        if let Some(key) = file.api_key.and_then(non_blank_key) {
            cfg.api_key = Some(key);
        } else if let Some(var) = file.api_key_env {
            if let Some(key) = std::env::var(&var).ok().and_then(non_blank_key) {
                cfg.api_key = Some(key);
            }
        }
        if let Some(secs) = file.timeout_secs {
            cfg.timeout = Duration::from_secs(secs);
        }
        if let Some(proxy) = file.proxy {
            cfg.proxy = Some(proxy);
        }
        if let Some(format) = file.tool_format {
            cfg.tool_format = format;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the base URL and timeouts.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base url: {}", e),
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_details(self.base_url.clone())
                    .with_source("config_validator"),
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                format!("unsupported base url scheme: {}", url.scheme()),
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_source("config_validator"),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::configuration_with_context(
                "timeout must be greater than zero",
                ErrorContext::new()
                    .with_field_path("config.timeout")
                    .with_source("config_validator"),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    base_url: Option<String>,
    api_key: Option<String>,
    api_key_env: Option<String>,
    timeout_secs: Option<u64>,
    proxy: Option<String>,
    tool_format: Option<ToolWireFormat>,
    local_runtime: Option<LocalRuntime>,
}

fn keyring_api_key() -> Option<String> {
    let entry = Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
    entry.get_password().ok().and_then(non_blank_key)
}

/// Blank or whitespace-only credentials count as absent.
pub(crate) fn non_blank_key(key: String) -> Option<String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_defaults() {
        let cfg = ClientConfig::from_lookup(|_| None);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
        assert_eq!(cfg.tool_format, ToolWireFormat::Tools);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let env: HashMap<&str, &str> = [
            ("OPENAI_BASE_URL", "http://localhost:8000/v1"),
            ("OPENAI_API_KEY", "sk-test"),
            ("AI_TIMEOUT_SECS", "90"),
            ("AI_TOOL_WIRE_FORMAT", "functions"),
        ]
        .into_iter()
        .collect();
        let cfg = ClientConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.base_url, "http://localhost:8000/v1");
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.timeout, Duration::from_secs(90));
        assert_eq!(cfg.tool_format, ToolWireFormat::Functions);
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let cfg = ClientConfig::from_lookup(|k| (k == "OPENAI_API_KEY").then(|| "  ".to_string()));
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn test_local_presets() {
        let ollama = ClientConfig::local(LocalRuntime::Ollama);
        assert_eq!(ollama.base_url, "http://localhost:11434/v1");
        assert_eq!(ollama.api_key.as_deref(), Some("ollama"));

        let vllm = ClientConfig::local(LocalRuntime::Vllm);
        assert_eq!(vllm.base_url, "http://localhost:8000/v1");
        assert_eq!(vllm.api_key.as_deref(), Some("dummy"));
    }

    #[test]
    fn test_yaml_with_local_runtime() {
        let cfg = ClientConfig::from_yaml_str(
            "local_runtime: vllm\ntimeout_secs: 120\ntool_format: functions\n",
        )
        .unwrap();
        assert_eq!(cfg.base_url, "http://localhost:8000/v1");
        assert_eq!(cfg.api_key.as_deref(), Some("dummy"));
        assert_eq!(cfg.timeout, Duration::from_secs(120));
        assert_eq!(cfg.tool_format, ToolWireFormat::Functions);
    }

    #[test]
    fn test_yaml_blank_credentials_are_missing() {
        let cfg = ClientConfig::from_yaml_str("api_key: \"  \"\n").unwrap();
        assert!(cfg.api_key.is_none());

        std::env::set_var("AI_LIB_CHAT_TEST_BLANK_KEY", "");
        let cfg = ClientConfig::from_yaml_str("api_key_env: AI_LIB_CHAT_TEST_BLANK_KEY\n").unwrap();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn test_yaml_rejects_unknown_keys() {
        let err = ClientConfig::from_yaml_str("base_urll: http://x\n").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        assert!(ClientConfig::new("not a url").validate().is_err());
        assert!(ClientConfig::new("ftp://example.com").validate().is_err());
        assert!(ClientConfig::new("http://localhost:11434/v1").validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_credential() {
        let mut cfg = ClientConfig::default();
        cfg.api_key = Some("sk-secret".into());
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
