//! Tool use example
//!
//! Describes built-in tools (browser, python, file operations) to the model through the
//! system prompt rather than through declared `ToolSpec`s. The model answers in text;
//! executing those tools is left to the application.
//!
//! Usage:
//!   OPENAI_API_KEY="your_key" cargo run --example tool_use

use ai_lib_chat::{ChatClient, CompletionRequest, Message};
use tracing_subscriber::EnvFilter;

struct Scenario {
    title: &'static str,
    model: &'static str,
    system: &'static str,
    question: &'static str,
    max_output_tokens: u32,
    temperature: f64,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        title: "Browser Tool",
        model: "gpt-oss-120b",
        system: "You have access to a browser tool that can:\n\
                 - search: Search for information on the web\n\
                 - open: Open a specific webpage\n\
                 - find: Find specific content on a page\n\
                 Use the browser tool when you need current information or to verify facts.",
        question: "What are the latest AI developments in 2024?",
        max_output_tokens: 300,
        temperature: 0.7,
    },
    Scenario {
        title: "Python Tool",
        model: "gpt-oss-20b",
        system: "You have access to a Python execution environment that can run code, \
                 perform calculations and process data.\n\
                 Use the Python tool when you need to perform calculations or data processing.",
        question: "Calculate the factorial of 10 and show the steps.",
        max_output_tokens: 250,
        temperature: 0.3,
    },
    Scenario {
        title: "File Operations",
        model: "gpt-oss-120b",
        system: "You have access to file operations that can:\n\
                 - create: Create new files\n\
                 - update: Modify existing files\n\
                 - delete: Remove files\n\
                 Use file operations when you need to work with local files.",
        question: "Create a simple Python script that prints 'Hello, World!'",
        max_output_tokens: 200,
        temperature: 0.5,
    },
    Scenario {
        title: "Combined Tools",
        model: "gpt-oss-120b",
        system: "You have access to multiple tools:\n\
                 - Browser: For web search and information gathering\n\
                 - Python: For calculations and data processing\n\
                 - File operations: For creating and modifying files\n\
                 Use the appropriate tool based on the task requirements.",
        question: "Research the current stock price of Apple, calculate the percentage change \
                   from yesterday, and save the results to a file.",
        max_output_tokens: 350,
        temperature: 0.4,
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = ChatClient::from_env()?;

    for scenario in SCENARIOS {
        println!("\n=== {} Example ===", scenario.title);
        let request = CompletionRequest::new(
            scenario.model,
            vec![Message::system(scenario.system), Message::user(scenario.question)],
        )
        .max_output_tokens(scenario.max_output_tokens)
        .temperature(scenario.temperature);

        let reply = client.complete(&request).await?;
        println!("Question: {}", scenario.question);
        println!("Response: {}", reply.text().unwrap_or_default());
    }

    println!("\nThe tools above are only described to the model. To have them executed, declare");
    println!("them as ToolSpecs and register handlers in a ToolRegistry (see the function_calling example).");
    Ok(())
}
