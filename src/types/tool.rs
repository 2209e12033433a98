//! Tool declarations and model-issued tool calls.

use serde::{Deserialize, Serialize};

/// A tool the model may ask the caller to invoke.
///
/// `parameter_schema` is a JSON Schema object (`type: object`, `properties`, `required`).
/// Tool names must be unique within a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameter_schema: serde_json::Value,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameter_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameter_schema,
        }
    }

    /// Declare a tool whose parameters are described by a Rust type.
    ///
    /// ```
    /// use ai_lib_chat::types::ToolSpec;
    ///
    /// #[derive(schemars::JsonSchema)]
    /// #[allow(dead_code)]
    /// struct GetTime {
    ///     timezone: String,
    /// }
    ///
    /// let spec = ToolSpec::from_type::<GetTime>("get_time", "Get current time for a timezone");
    /// assert_eq!(spec.parameter_schema["required"][0], "timezone");
    /// ```
    pub fn from_type<T: schemars::JsonSchema>(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            description,
            crate::structured::json_schema_from_type::<T>(),
        )
    }
}

/// Tool invocation requested by the model.
///
/// Only ever produced by decoding a server response; `arguments` is the parsed
/// key/value payload, never the transport string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Server-assigned invocation id (absent for the legacy `function_call` form).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub arguments: serde_json::Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            id: None,
            name: name.into(),
            arguments,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Look up a string argument.
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }
}
