//! Wire protocol for OpenAI-compatible chat completion endpoints.

pub mod wire;

pub use wire::{
    decode_messages, decode_tools, encode_messages, encode_request, encode_tools,
    extract_error_message, WireRequest, WireResponse, WireRole,
};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Path appended to the configured base URL.
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// How tool declarations are placed on the wire.
///
/// Responses are decoded in both forms regardless of this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolWireFormat {
    /// `tools` + `tool_choice` (current form)
    #[default]
    Tools,
    /// Legacy `functions` + `function_call`
    Functions,
}

impl FromStr for ToolWireFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tools" => Ok(ToolWireFormat::Tools),
            "functions" => Ok(ToolWireFormat::Functions),
            other => Err(format!("unknown tool wire format: {}", other)),
        }
    }
}
