//! # Types Module
//!
//! Request-scoped value types for a chat completion.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Conversation turn with role and text content |
//! | [`MessageRole`] | system, user, assistant, tool |
//! | [`ToolSpec`] | Tool declaration with a JSON Schema for its parameters |
//! | [`ToolCall`] | Tool invocation requested by the model |
//! | [`CompletionRequest`] | Model, conversation, tools and sampling parameters |
//! | [`CompletionResult`] | Text reply or tool invocation |
//!
//! ## Example
//!
//! ```rust
//! use ai_lib_chat::types::{CompletionRequest, Message, ReasoningEffort, ToolSpec};
//!
//! let weather = ToolSpec::new(
//!     "get_weather",
//!     "Get current weather information for a location",
//!     serde_json::json!({
//!         "type": "object",
//!         "properties": {
//!             "location": {"type": "string"}
//!         },
//!         "required": ["location"]
//!     }),
//! );
//!
//! let request = CompletionRequest::new(
//!     "gpt-oss-120b",
//!     vec![Message::user("What's the weather like in New York?")],
//! )
//! .tool(weather)
//! .reasoning_effort(ReasoningEffort::Low);
//!
//! assert_eq!(request.tools.len(), 1);
//! ```

pub mod message;
pub mod request;
pub mod response;
pub mod tool;

pub use message::{Message, MessageRole};
pub use request::{CompletionRequest, ReasoningEffort, SamplingParams};
pub use response::{CompletionResult, Usage};
pub use tool::{ToolCall, ToolSpec};
