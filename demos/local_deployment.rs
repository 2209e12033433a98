//! Local deployment example
//!
//! Talks to a model served by a local OpenAI-compatible runtime.
//!
//! Usage:
//!   ollama pull gpt-oss:20b && ollama serve
//!   cargo run --example local_deployment -- ollama
//!
//!   vllm serve openai/gpt-oss-20b
//!   cargo run --example local_deployment -- vllm

use ai_lib_chat::{ChatClientBuilder, CompletionRequest, Error, LocalRuntime, Message};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (runtime, model, hint) = match std::env::args().nth(1).as_deref() {
        Some("vllm") => (LocalRuntime::Vllm, "gpt-oss-20b", "Make sure the vLLM server is running"),
        _ => (
            LocalRuntime::Ollama,
            "gpt-oss:20b",
            "Make sure Ollama is running with: ollama serve",
        ),
    };

    let client = ChatClientBuilder::new().local(runtime).build()?;
    println!("=== {:?} at {} ===", runtime, runtime.base_url());

    let request = CompletionRequest::new(
        model,
        vec![Message::user("Explain what MXFP4 quantization is.")],
    );

    match client.complete(&request).await {
        Ok(reply) => println!("Response: {}", reply.text().unwrap_or_default()),
        Err(e @ Error::EndpointUnreachable { .. }) => {
            println!("Error: {}", e);
            println!("{}", hint);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
