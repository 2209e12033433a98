//! Completion outcomes.

use serde::{Deserialize, Serialize};

use super::tool::ToolCall;

/// Outcome of a successful completion: exactly one of a text reply or a tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionResult {
    TextReply { content: String },
    ToolInvocation(ToolCall),
}

impl CompletionResult {
    pub fn text(&self) -> Option<&str> {
        match self {
            CompletionResult::TextReply { content } => Some(content),
            CompletionResult::ToolInvocation(_) => None,
        }
    }

    pub fn tool_call(&self) -> Option<&ToolCall> {
        match self {
            CompletionResult::ToolInvocation(call) => Some(call),
            CompletionResult::TextReply { .. } => None,
        }
    }

    pub fn is_tool_invocation(&self) -> bool {
        matches!(self, CompletionResult::ToolInvocation(_))
    }
}

/// Token accounting reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}
