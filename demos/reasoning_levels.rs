//! Reasoning effort example
//!
//! Asks the same question at each reasoning effort level.
//!
//! Usage:
//!   OPENAI_API_KEY="your_key" cargo run --example reasoning_levels

use ai_lib_chat::{ChatClient, CompletionRequest, Message, ReasoningEffort};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = ChatClient::from_env()?;

    let problem = "A train travels 120 km in 1.5 hours, then 80 km in 1 hour. \
                   What is its average speed for the whole journey?";
    let request = CompletionRequest::new(
        "gpt-oss-120b",
        vec![
            Message::system(
                "You are a helpful math tutor. Always show your step-by-step reasoning \
                 before giving the final answer.",
            ),
            Message::user(format!("Please solve this problem step by step:\n{}", problem)),
        ],
    );

    println!("=== Reasoning Levels Comparison ===");
    for effort in ReasoningEffort::ALL {
        println!("\n--- Reasoning Level: {} ---", effort.as_str().to_uppercase());
        let (reply, stats) = client
            .complete_with_stats(&request.clone().reasoning_effort(effort))
            .await?;
        println!("{}", reply.text().unwrap_or_default());
        if let Some(usage) = stats.usage {
            println!("(completion tokens: {}, {}ms)", usage.completion_tokens, stats.duration_ms);
        }
    }

    Ok(())
}
