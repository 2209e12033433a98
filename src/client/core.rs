use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::protocol::{encode_request, CHAT_COMPLETIONS_PATH};
use crate::transport::HttpTransport;
use crate::types::{CompletionRequest, CompletionResult};
use crate::{Error, Result};

use super::config::ClientConfig;
use super::response::interpret_reply;
use super::stats::CallStats;
use super::validation::validate_request;

/// Chat completion client for one OpenAI-compatible endpoint.
///
/// Holds only immutable configuration and a pooled HTTP client, so a single instance
/// can serve concurrent calls from many tasks (`&self` everywhere).
pub struct ChatClient {
    pub(crate) config: ClientConfig,
    pub(crate) transport: HttpTransport,
}

impl ChatClient {
    /// Client configured from the environment (see [`ClientConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        super::builder::ChatClientBuilder::from_env().build()
    }

    pub fn builder() -> super::builder::ChatClientBuilder {
        super::builder::ChatClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one completion request and interpret the reply.
    ///
    /// Exactly one network round trip per call, no retries. Invalid requests and a missing
    /// credential are rejected before anything is sent.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResult> {
        Ok(self.complete_with_stats(request).await?.0)
    }

    /// Like [`complete`](Self::complete), also returning per-call stats (latency, request ids, usage).
    pub async fn complete_with_stats(
        &self,
        request: &CompletionRequest,
    ) -> Result<(CompletionResult, CallStats)> {
        validate_request(request)?;
        if !self.transport.has_credential() {
            return Err(Error::AuthenticationMissing);
        }

        let body = encode_request(request, self.config.tool_format);
        let client_request_id = Uuid::new_v4().to_string();

        debug!(
            model = request.model.as_str(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            reasoning_effort = request.sampling.reasoning_effort.map(|r| r.as_str()),
            request_id = client_request_id.as_str(),
            "sending chat completion"
        );

        let start = Instant::now();
        let reply = self
            .transport
            .post_json(CHAT_COMPLETIONS_PATH, &body, &client_request_id)
            .await
            .map_err(|e| {
                warn!(
                    error = %e,
                    request_id = client_request_id.as_str(),
                    "chat completion transport failure"
                );
                e
            })?;
        let duration_ms = start.elapsed().as_millis();

        let interpreted = match interpret_reply(&reply, request) {
            Ok(i) => i,
            Err(e) => {
                warn!(
                    http_status = reply.status,
                    error = %e,
                    duration_ms,
                    request_id = client_request_id.as_str(),
                    "chat completion failed"
                );
                return Err(e);
            }
        };

        info!(
            http_status = reply.status,
            model = request.model.as_str(),
            tool_invocation = interpreted.result.is_tool_invocation(),
            finish_reason = interpreted.finish_reason.as_deref(),
            duration_ms,
            "chat completion finished"
        );

        let stats = CallStats {
            model: request.model.clone(),
            served_model: interpreted.model,
            endpoint: self.transport.url_for(CHAT_COMPLETIONS_PATH),
            http_status: reply.status,
            duration_ms,
            client_request_id,
            upstream_request_id: reply.upstream_request_id,
            finish_reason: interpreted.finish_reason,
            usage: interpreted.usage,
        };

        Ok((interpreted.result, stats))
    }
}
