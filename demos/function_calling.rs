//! Function calling example
//!
//! Declares tools, lets the model pick one, runs it locally through a `ToolRegistry`
//! and sends the result back for a final answer.
//!
//! Usage:
//!   OPENAI_API_KEY="your_key" cargo run --example function_calling
//!   AI_TOOL_WIRE_FORMAT=functions cargo run --example function_calling   # legacy servers

use ai_lib_chat::structured::ParameterSchema;
use ai_lib_chat::{
    ChatClient, CompletionRequest, CompletionResult, Message, ToolRegistry, ToolSpec,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn tools() -> anyhow::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    registry.register_fn(
        ToolSpec::new(
            "get_weather",
            "Get current weather information for a location",
            ParameterSchema::new()
                .property("location", "string", "The city and state, e.g. San Francisco, CA")
                .enum_property("unit", &["celsius", "fahrenheit"], "The temperature unit to use")
                .required(&["location"])
                .build(),
        ),
        |args| async move {
            let unit = args["unit"].as_str().unwrap_or("fahrenheit").to_string();
            Ok::<_, anyhow::Error>(json!({
                "location": args["location"],
                "temperature": if unit == "celsius" { 22 } else { 72 },
                "unit": unit,
                "conditions": "sunny",
            }))
        },
    )?;

    registry.register_fn(
        ToolSpec::new(
            "get_time",
            "Get current time for a timezone",
            ParameterSchema::new()
                .property("timezone", "string", "IANA timezone name")
                .required(&["timezone"])
                .build(),
        ),
        |args| async move {
            Ok::<_, anyhow::Error>(json!({"timezone": args["timezone"], "time": "14:30"}))
        },
    )?;

    Ok(registry)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = ChatClient::from_env()?;
    let registry = tools()?;

    let mut request = CompletionRequest::new(
        "gpt-oss-120b",
        vec![Message::user("What's the weather in Tokyo and what time is it there?")],
    )
    .tools(registry.specs());

    for _ in 0..4 {
        match client.complete(&request).await? {
            CompletionResult::TextReply { content } => {
                println!("Answer: {}", content);
                return Ok(());
            }
            CompletionResult::ToolInvocation(call) => {
                println!("Function called: {}", call.name);
                println!("Arguments: {}", call.arguments);
                let result = registry.dispatch(&call).await?;
                println!("Result: {}", result.content);
                request = request
                    .message(Message::assistant_tool_call(call))
                    .message(result);
            }
        }
    }

    println!("No final answer after several tool rounds");
    Ok(())
}
