//! # ai-lib-chat
//!
//! Minimal chat completion client for OpenAI-compatible endpoints, with tool calling.
//!
//! ## Overview
//!
//! One call, one round trip: a [`CompletionRequest`] (model, conversation, tool declarations,
//! sampling parameters) goes out, and a [`CompletionResult`] comes back. The result is either a
//! text reply or a tool invocation whose arguments are already parsed into a JSON object and
//! checked against the declared parameter schema.
//!
//! The same client targets hosted services and local OpenAI-compatible runtimes (Ollama, vLLM);
//! only the base URL and credential differ.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ai_lib_chat::{ChatClient, CompletionRequest, CompletionResult, Message};
//!
//! #[tokio::main]
//! async fn main() -> ai_lib_chat::Result<()> {
//!     let client = ChatClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let request = CompletionRequest::new(
//!         "gpt-oss-120b",
//!         vec![
//!             Message::system("You are a helpful assistant."),
//!             Message::user("What is 2+2?"),
//!         ],
//!     );
//!
//!     match client.complete(&request).await? {
//!         CompletionResult::TextReply { content } => println!("{}", content),
//!         CompletionResult::ToolInvocation(call) => println!("tool: {}", call.name),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder and configuration |
//! | [`types`] | Messages, tool declarations, requests and results |
//! | [`protocol`] | OpenAI-compatible wire encoding and decoding |
//! | [`structured`] | Parameter schemas and argument validation |
//! | [`tools`] | Local dispatch of tool invocations |
//! | [`transport`] | HTTP transport |

pub mod client;
pub mod protocol;
pub mod structured;
pub mod tools;
pub mod transport;
pub mod types;

pub use client::{CallStats, ChatClient, ChatClientBuilder, ClientConfig, LocalRuntime};
pub use protocol::ToolWireFormat;
pub use tools::{ToolHandler, ToolRegistry};
pub use types::{
    CompletionRequest, CompletionResult, Message, MessageRole, ReasoningEffort, SamplingParams,
    ToolCall, ToolSpec, Usage,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
