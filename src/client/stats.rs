use crate::types::Usage;

/// Per-call facts for observability. Produced by [`ChatClient::complete_with_stats`](super::ChatClient::complete_with_stats).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallStats {
    /// Model requested by the caller.
    pub model: String,
    /// Model the server reports having used, when it says.
    pub served_model: Option<String>,
    pub endpoint: String,
    pub http_status: u16,
    pub duration_ms: u128,
    /// Our own correlation id, sent as `x-request-id`.
    pub client_request_id: String,
    pub upstream_request_id: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}
