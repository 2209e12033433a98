//! Tool dispatch: route a model-issued [`ToolCall`] to a local handler.
//!
//! The registry is the single source of tool declarations for a conversation:
//! [`ToolRegistry::specs`] yields what to send, [`ToolRegistry::dispatch`] runs the
//! handler for what came back and produces the `tool` message to append.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::types::{Message, ToolCall, ToolSpec};
use crate::{Error, ErrorContext, Result};

/// Local implementation of a declared tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool with already-validated arguments.
    async fn call(&self, arguments: Value) -> anyhow::Result<Value>;
}

struct FnHandler<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
{
    async fn call(&self, arguments: Value) -> anyhow::Result<Value> {
        (self.f)(arguments).await
    }
}

#[derive(Default, Clone)]
pub struct ToolRegistry {
    entries: Vec<(ToolSpec, Arc<dyn ToolHandler>)>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Tool names must be unique.
    pub fn register(&mut self, spec: ToolSpec, handler: Arc<dyn ToolHandler>) -> Result<()> {
        if self.entries.iter().any(|(s, _)| s.name == spec.name) {
            return Err(Error::invalid_request_with_context(
                format!("duplicate tool name: {}", spec.name),
                ErrorContext::new().with_source("tool_registry"),
            ));
        }
        self.entries.push((spec, handler));
        Ok(())
    }

    /// Register an async closure as a handler.
    pub fn register_fn<F, Fut>(&mut self, spec: ToolSpec, f: F) -> Result<()>
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        self.register(spec, Arc::new(FnHandler { f }))
    }

    /// Declarations in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.entries.iter().map(|(s, _)| s.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(s, _)| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the handler for `call` and wrap its output as a `tool` message.
    ///
    /// Handler failures become `{"error": "..."}` content so the model can react; only an
    /// unregistered tool name is an error here.
    pub async fn dispatch(&self, call: &ToolCall) -> Result<Message> {
        let handler = self
            .entries
            .iter()
            .find(|(s, _)| s.name == call.name)
            .map(|(_, h)| h.clone())
            .ok_or_else(|| {
                Error::invalid_request_with_context(
                    format!("no handler registered for tool: {}", call.name),
                    ErrorContext::new().with_source("tool_registry"),
                )
            })?;

        debug!(tool = call.name.as_str(), "dispatching tool call");
        let output = match handler.call(call.arguments.clone()).await {
            Ok(v) => v,
            Err(e) => {
                warn!(tool = call.name.as_str(), error = %e, "tool handler failed");
                json!({ "error": e.to_string() })
            }
        };

        let content = match output {
            Value::String(s) => s,
            other => other.to_string(),
        };
        Ok(Message::tool(call.id.clone(), content))
    }

    /// Dispatch several calls concurrently; results keep input order.
    pub async fn dispatch_all(&self, calls: &[ToolCall]) -> Vec<Result<Message>> {
        futures::future::join_all(calls.iter().map(|c| self.dispatch(c))).await
    }
}
