//! Response interpretation: HTTP reply -> `CompletionResult`.

use crate::protocol::{extract_error_message, WireResponse};
use crate::structured::validate_tool_arguments;
use crate::transport::HttpReply;
use crate::types::{CompletionRequest, CompletionResult, ToolCall, Usage};
use crate::{Error, Result};

/// Decoded reply plus the metadata reported alongside it.
#[derive(Debug, Clone)]
pub(crate) struct Interpreted {
    pub result: CompletionResult,
    pub usage: Option<Usage>,
    pub finish_reason: Option<String>,
    pub model: Option<String>,
}

pub(crate) fn interpret_reply(reply: &HttpReply, request: &CompletionRequest) -> Result<Interpreted> {
    let status = reply.status;
    if !reply.is_success() {
        return Err(Error::upstream(status, extract_error_message(&reply.body)));
    }

    let response: WireResponse = serde_json::from_str(&reply.body)
        .map_err(|e| Error::upstream(status, format!("undecodable response body: {}", e)))?;

    let choice = response
        .choices
        .first()
        .ok_or_else(|| Error::upstream(status, "response contained no choices"))?;

    let result = match choice.message.selected_call() {
        Some((id, function)) => {
            if request.tools.is_empty() {
                return Err(Error::upstream(
                    status,
                    format!(
                        "server selected tool '{}' but the request declared no tools",
                        function.name
                    ),
                ));
            }
            let tool = request.find_tool(&function.name).ok_or_else(|| {
                Error::upstream(
                    status,
                    format!("server selected undeclared tool '{}'", function.name),
                )
            })?;
            let arguments = function.parse_arguments()?;
            validate_tool_arguments(tool, &arguments)?;
            CompletionResult::ToolInvocation(ToolCall {
                id: id.map(|s| s.to_string()),
                name: function.name.clone(),
                arguments,
            })
        }
        None => CompletionResult::TextReply {
            content: choice.message.content.clone().unwrap_or_default(),
        },
    };

    Ok(Interpreted {
        result,
        usage: response.usage,
        finish_reason: choice.finish_reason.clone(),
        model: response.model.clone(),
    })
}
