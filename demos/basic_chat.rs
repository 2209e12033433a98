//! Basic chat example
//!
//! Sends a single question to two model sizes and prints the replies.
//!
//! Usage:
//!   OPENAI_API_KEY="your_key" cargo run --example basic_chat

use ai_lib_chat::{ChatClient, CompletionRequest, Message};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = ChatClient::from_env()?;
    if client.config().api_key.is_none() {
        eprintln!("Error: set OPENAI_API_KEY (or store a key in the OS keyring under ai-lib-chat/openai)");
        return Ok(());
    }

    println!("=== Basic Chat with gpt-oss-120b ===");
    let request = CompletionRequest::new(
        "gpt-oss-120b",
        vec![Message::user("Explain quantum computing in simple terms.")],
    )
    .max_output_tokens(200)
    .temperature(0.7);
    let reply = client.complete(&request).await?;
    println!("{}\n", reply.text().unwrap_or_default());

    println!("=== Comparing gpt-oss-120b vs gpt-oss-20b ===");
    let question = "What are the three laws of robotics?";
    for model in ["gpt-oss-120b", "gpt-oss-20b"] {
        let request = CompletionRequest::new(model, vec![Message::user(question)])
            .max_output_tokens(150)
            .temperature(0.7);
        let (reply, stats) = client.complete_with_stats(&request).await?;
        println!("{} response ({}ms):", model, stats.duration_ms);
        println!("{}\n", reply.text().unwrap_or_default());
    }

    Ok(())
}
