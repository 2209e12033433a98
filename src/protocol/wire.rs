//! OpenAI-compatible `/chat/completions` wire format.
//!
//! Domain types are mapped onto these structs at the transport boundary only; nothing
//! outside `protocol` and `client` sees loosely-typed payloads.

use serde::{Deserialize, Serialize};

use super::ToolWireFormat;
use crate::types::{
    CompletionRequest, Message, MessageRole, ReasoningEffort, ToolCall, ToolSpec, Usage,
};
use crate::{Error, Result};

const TOOL_CHOICE_AUTO: &str = "auto";
const FUNCTION_TYPE: &str = "function";

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<WireFunction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<String>,
    pub max_tokens: u32,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
}

/// Message role as sent on the wire. `function` is the legacy tool-result role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    System,
    User,
    Assistant,
    Tool,
    Function,
}

impl From<MessageRole> for WireRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::System => WireRole::System,
            MessageRole::User => WireRole::User,
            MessageRole::Assistant => WireRole::Assistant,
            MessageRole::Tool => WireRole::Tool,
        }
    }
}

impl From<WireRole> for MessageRole {
    fn from(role: WireRole) -> Self {
        match role {
            WireRole::System => MessageRole::System,
            WireRole::User => MessageRole::User,
            WireRole::Assistant => MessageRole::Assistant,
            WireRole::Tool | WireRole::Function => MessageRole::Tool,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: WireRole,
    #[serde(default)]
    pub content: Option<String>,
    /// Function name on legacy `function` result turns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<WireFunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: WireFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default = "function_type")]
    pub call_type: String,
    pub function: WireFunctionCall,
}

fn function_type() -> String {
    FUNCTION_TYPE.to_string()
}

/// `arguments` is normally a JSON-encoded string; some local servers send the object inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

impl WireFunctionCall {
    fn from_call(call: &ToolCall) -> Self {
        Self {
            name: call.name.clone(),
            arguments: serde_json::Value::String(call.arguments.to_string()),
        }
    }

    /// Parse the transport encoding of `arguments` into a key/value object.
    pub fn parse_arguments(&self) -> Result<serde_json::Value> {
        let parsed = match &self.arguments {
            serde_json::Value::String(raw) if raw.trim().is_empty() => {
                serde_json::Value::Object(Default::default())
            }
            serde_json::Value::String(raw) => serde_json::from_str(raw)
                .map_err(|e| Error::malformed_arguments(&self.name, e.to_string()))?,
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other.clone(),
        };
        if !parsed.is_object() {
            return Err(Error::malformed_arguments(
                &self.name,
                format!("expected a JSON object, got {}", json_kind(&parsed)),
            ));
        }
        Ok(parsed)
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<WireChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireChoice {
    pub message: WireResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<WireToolCall>>,
    #[serde(default)]
    pub function_call: Option<WireFunctionCall>,
}

impl WireResponseMessage {
    /// The tool selection signalled by the server, in either the `tool_calls` or the legacy
    /// `function_call` form. Only the first call is considered.
    pub fn selected_call(&self) -> Option<(Option<&str>, &WireFunctionCall)> {
        if let Some(call) = self.tool_calls.as_ref().and_then(|calls| calls.first()) {
            return Some((call.id.as_deref(), &call.function));
        }
        self.function_call.as_ref().map(|f| (None, f))
    }
}

/// Compile a request into its wire body.
pub fn encode_request(request: &CompletionRequest, format: ToolWireFormat) -> WireRequest {
    let messages = encode_messages(&request.messages, format);
    let has_tools = !request.tools.is_empty();

    let (tools, tool_choice, functions, function_call) = match (has_tools, format) {
        (false, _) => (None, None, None, None),
        (true, ToolWireFormat::Tools) => (
            Some(encode_tools(&request.tools)),
            Some(TOOL_CHOICE_AUTO.to_string()),
            None,
            None,
        ),
        (true, ToolWireFormat::Functions) => (
            None,
            None,
            Some(request.tools.iter().map(encode_function).collect()),
            Some(TOOL_CHOICE_AUTO.to_string()),
        ),
    };

    WireRequest {
        model: request.model.clone(),
        messages,
        tools,
        tool_choice,
        functions,
        function_call,
        max_tokens: request.sampling.max_output_tokens,
        temperature: request.sampling.temperature,
        top_p: request.sampling.top_p,
        reasoning_effort: request.sampling.reasoning_effort,
    }
}

/// Encode a conversation.
///
/// In the legacy `functions` form, tool results become `function` turns named after the call
/// they answer (matched by id, else the most recent call). Call ids have no place in that form
/// and are not sent.
pub fn encode_messages(messages: &[Message], format: ToolWireFormat) -> Vec<WireMessage> {
    let mut calls: Vec<&ToolCall> = Vec::new();
    messages
        .iter()
        .map(|m| {
            let wire = encode_message(m, format, &calls);
            if let Some(call) = &m.tool_call {
                calls.push(call);
            }
            wire
        })
        .collect()
}

fn encode_message(message: &Message, format: ToolWireFormat, earlier: &[&ToolCall]) -> WireMessage {
    // Assistant turns that only carry a tool call send `content: null`.
    let content = if message.tool_call.is_some() && message.content.is_empty() {
        None
    } else {
        Some(message.content.clone())
    };

    match format {
        ToolWireFormat::Tools => WireMessage {
            role: message.role.into(),
            content,
            name: None,
            tool_calls: message.tool_call.as_ref().map(|call| {
                vec![WireToolCall {
                    id: call.id.clone(),
                    call_type: function_type(),
                    function: WireFunctionCall::from_call(call),
                }]
            }),
            function_call: None,
            tool_call_id: message.tool_call_id.clone(),
        },
        ToolWireFormat::Functions if message.role == MessageRole::Tool => WireMessage {
            role: WireRole::Function,
            content,
            name: answered_call(message.tool_call_id.as_deref(), earlier).map(|c| c.name.clone()),
            tool_calls: None,
            function_call: None,
            tool_call_id: None,
        },
        ToolWireFormat::Functions => WireMessage {
            role: message.role.into(),
            content,
            name: None,
            tool_calls: None,
            function_call: message.tool_call.as_ref().map(WireFunctionCall::from_call),
            tool_call_id: None,
        },
    }
}

fn answered_call<'a>(id: Option<&str>, earlier: &[&'a ToolCall]) -> Option<&'a ToolCall> {
    let by_id = id.and_then(|id| {
        earlier
            .iter()
            .rev()
            .find(|c| c.id.as_deref() == Some(id))
            .copied()
    });
    by_id.or_else(|| earlier.last().copied())
}

pub fn encode_tools(tools: &[ToolSpec]) -> Vec<WireTool> {
    tools
        .iter()
        .map(|t| WireTool {
            tool_type: function_type(),
            function: encode_function(t),
        })
        .collect()
}

fn encode_function(tool: &ToolSpec) -> WireFunction {
    WireFunction {
        name: tool.name.clone(),
        description: if tool.description.is_empty() {
            None
        } else {
            Some(tool.description.clone())
        },
        parameters: tool.parameter_schema.clone(),
    }
}

/// Decode wire messages back into domain messages.
pub fn decode_messages(messages: &[WireMessage]) -> Result<Vec<Message>> {
    messages.iter().map(decode_message).collect()
}

fn decode_message(message: &WireMessage) -> Result<Message> {
    let tool_call = match message.tool_calls.as_ref().and_then(|c| c.first()) {
        Some(call) => Some(ToolCall {
            id: call.id.clone(),
            name: call.function.name.clone(),
            arguments: call.function.parse_arguments()?,
        }),
        None => match &message.function_call {
            Some(f) => Some(ToolCall::new(f.name.clone(), f.parse_arguments()?)),
            None => None,
        },
    };

    Ok(Message {
        role: message.role.into(),
        content: message.content.clone().unwrap_or_default(),
        tool_call,
        tool_call_id: message.tool_call_id.clone(),
    })
}

/// Decode tool declarations from either wire form.
pub fn decode_tools(request: &WireRequest) -> Vec<ToolSpec> {
    let from_tools = request
        .tools
        .iter()
        .flatten()
        .map(|t| &t.function);
    let from_functions = request.functions.iter().flatten();
    from_tools.chain(from_functions).map(decode_function).collect()
}

fn decode_function(function: &WireFunction) -> ToolSpec {
    ToolSpec {
        name: function.name.clone(),
        description: function.description.clone().unwrap_or_default(),
        parameter_schema: function.parameters.clone(),
    }
}

/// Extract a human-readable message from an error body.
///
/// Prefers the common `{"error": {"message": ...}}` shape, then `{"error": "..."}`, then the raw body.
pub fn extract_error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let from_json = parsed.as_ref().and_then(|json| {
        let err = json.get("error")?;
        err.get("message")
            .and_then(|m| m.as_str())
            .or_else(|| err.as_str())
            .map(|s| s.to_string())
    });
    match from_json {
        Some(msg) => msg,
        None if body.trim().is_empty() => "empty response body".to_string(),
        None => body.trim().to_string(),
    }
}
