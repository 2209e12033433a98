//! End-to-end tests for `ChatClient::complete` against a mock OpenAI-compatible server.

use std::sync::Arc;
use std::time::Duration;

use ai_lib_chat::{
    ChatClient, CompletionRequest, CompletionResult, Error, Message, ReasoningEffort,
    ToolWireFormat, ToolSpec,
};
use mockito::{Matcher, Server};
use serde_json::json;

const PATH: &str = "/chat/completions";

fn client_for(base_url: &str) -> ChatClient {
    ChatClient::builder()
        .base_url(base_url)
        .api_key("test-key")
        .build()
        .expect("client should build")
}

fn weather_tool() -> ToolSpec {
    ToolSpec::new(
        "get_weather",
        "Get current weather information for a location",
        json!({
            "type": "object",
            "properties": {
                "location": {"type": "string", "description": "The city and state"},
                "unit": {"type": "string", "enum": ["celsius", "fahrenheit"]}
            },
            "required": ["location"]
        }),
    )
}

fn math_request() -> CompletionRequest {
    CompletionRequest::new(
        "gpt-oss-120b",
        vec![
            Message::system("You are a helpful assistant."),
            Message::user("What is 2+2?"),
        ],
    )
}

fn weather_request() -> CompletionRequest {
    CompletionRequest::new(
        "gpt-oss-120b",
        vec![Message::user("What's the weather like in New York?")],
    )
    .tool(weather_tool())
}

fn text_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "model": "gpt-oss-120b",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 20, "completion_tokens": 8, "total_tokens": 28}
    })
    .to_string()
}

fn tool_call_body(name: &str, arguments: &str) -> String {
    json!({
        "id": "chatcmpl-2",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": name, "arguments": arguments}
                }]
            },
            "finish_reason": "tool_calls"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_text_reply() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(text_body("2 + 2 equals 4."))
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let result = client.complete(&math_request()).await.unwrap();

    match result {
        CompletionResult::TextReply { content } => assert!(content.contains('4')),
        other => panic!("expected text reply, got {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_tool_invocation_arguments_are_parsed() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"tool_choice": "auto"})),
            Matcher::Regex(r#""type":"function","function":\{"name":"get_weather""#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(tool_call_body("get_weather", r#"{"location": "NYC"}"#))
        .create_async()
        .await;

    let client = client_for(&server.url());
    let result = client.complete(&weather_request()).await.unwrap();

    let call = result.tool_call().expect("tool invocation");
    assert_eq!(call.name, "get_weather");
    assert_eq!(call.arguments, json!({"location": "NYC"}));
    assert_eq!(call.id.as_deref(), Some("call_1"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_bearer_credential_is_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("authorization", "Bearer test-key")
        .match_header("x-request-id", Matcher::Any)
        .with_status(200)
        .with_body(text_body("ok"))
        .create_async()
        .await;

    let client = client_for(&server.url());
    client.complete(&math_request()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_sampling_and_reasoning_effort_on_the_wire() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-oss-120b",
            "max_tokens": 512,
            "temperature": 0.5,
            "reasoning_effort": "high"
        })))
        .with_status(200)
        .with_body(text_body("Step one..."))
        .create_async()
        .await;

    let client = client_for(&server.url());
    let request = math_request()
        .max_output_tokens(512)
        .temperature(0.5)
        .reasoning_effort(ReasoningEffort::High);
    client.complete(&request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_error_status_and_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "internal failure", "type": "server_error"}}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.complete(&math_request()).await.unwrap_err();

    match err {
        Error::Upstream { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal failure");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_is_retryable_upstream() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(429)
        .with_body("slow down")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.complete(&math_request()).await.unwrap_err();
    assert_eq!(err.status(), Some(429));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unparseable_arguments_are_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(tool_call_body("get_weather", "{location: NYC"))
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.complete(&weather_request()).await.unwrap_err();
    match err {
        Error::MalformedToolArguments { tool, .. } => assert_eq!(tool, "get_weather"),
        other => panic!("expected malformed arguments, got {:?}", other),
    }
}

#[tokio::test]
async fn test_arguments_violating_schema_are_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(tool_call_body("get_weather", r#"{"unit": "kelvin"}"#))
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.complete(&weather_request()).await.unwrap_err();
    assert!(matches!(err, Error::MalformedToolArguments { .. }));
}

#[tokio::test]
async fn test_undeclared_tool_selection_is_upstream_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(tool_call_body("get_time", "{}"))
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.complete(&weather_request()).await.unwrap_err();
    match err {
        Error::Upstream { message, .. } => assert!(message.contains("get_time")),
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_without_tools_never_yields_tool_invocation() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(tool_call_body("get_weather", r#"{"location": "NYC"}"#))
        .create_async()
        .await;

    let client = client_for(&server.url());
    let res = client.complete(&math_request()).await;
    assert!(matches!(res, Err(Error::Upstream { .. })));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_requests_never_reach_the_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(text_body("unused"))
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server.url());

    let empty = CompletionRequest::new("gpt-oss-120b", vec![]);
    assert!(matches!(
        client.complete(&empty).await,
        Err(Error::InvalidRequest { .. })
    ));

    let duplicate = weather_request().tool(weather_tool());
    assert!(matches!(
        client.complete(&duplicate).await,
        Err(Error::InvalidRequest { .. })
    ));

    let hot = math_request().temperature(3.0);
    assert!(matches!(
        client.complete(&hot).await,
        Err(Error::InvalidRequest { .. })
    ));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_credential_never_reaches_the_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(text_body("unused"))
        .expect(0)
        .create_async()
        .await;

    let client = ChatClient::builder().base_url(server.url()).build().unwrap();
    let err = client.complete(&math_request()).await.unwrap_err();
    assert!(matches!(err, Error::AuthenticationMissing));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_blank_credential_never_reaches_the_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(text_body("unused"))
        .expect(0)
        .create_async()
        .await;

    for key in ["", "   "] {
        let client = ChatClient::builder()
            .base_url(server.url())
            .api_key(key)
            .build()
            .unwrap();
        let err = client.complete(&math_request()).await.unwrap_err();
        assert!(matches!(err, Error::AuthenticationMissing));
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let client = ChatClient::builder()
        .base_url("http://127.0.0.1:1/v1")
        .api_key("test-key")
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let err = client.complete(&math_request()).await.unwrap_err();
    assert!(matches!(err, Error::EndpointUnreachable { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_timeout_is_endpoint_unreachable() {
    // Accepts connections at the kernel level but never answers.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let client = ChatClient::builder()
        .base_url(format!("http://{}", addr))
        .api_key("test-key")
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap();

    let err = client.complete(&math_request()).await.unwrap_err();
    match err {
        Error::EndpointUnreachable { reason, .. } => assert!(reason.contains("timed out")),
        other => panic!("expected endpoint unreachable, got {:?}", other),
    }
    drop(listener);
}

#[tokio::test]
async fn test_legacy_functions_wire_format() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"function_call": "auto"})),
            Matcher::Regex(r#""functions":\[\{"name":"get_weather""#.to_string()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "function_call": {
                            "name": "get_weather",
                            "arguments": "{\"location\": \"Paris\", \"unit\": \"celsius\"}"
                        }
                    },
                    "finish_reason": "function_call"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ChatClient::builder()
        .base_url(server.url())
        .api_key("test-key")
        .tool_wire_format(ToolWireFormat::Functions)
        .build()
        .unwrap();

    let result = client.complete(&weather_request()).await.unwrap();
    let call = result.tool_call().unwrap();
    assert_eq!(call.str_arg("location"), Some("Paris"));
    assert!(call.id.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_tool_result_turn_is_encoded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""tool_calls":\[\{"id":"call_1","type":"function""#.to_string()),
            Matcher::Regex(r#""role":"tool".*"tool_call_id":"call_1""#.to_string()),
        ]))
        .with_status(200)
        .with_body(text_body("It is 22 degrees in New York."))
        .create_async()
        .await;

    let call = ai_lib_chat::ToolCall::new("get_weather", json!({"location": "NYC"})).with_id("call_1");
    let request = weather_request()
        .message(Message::assistant_tool_call(call))
        .message(Message::tool(
            Some("call_1".to_string()),
            r#"{"temperature": 22, "unit": "celsius"}"#,
        ));

    let client = client_for(&server.url());
    let result = client.complete(&request).await.unwrap();
    assert_eq!(result.text(), Some("It is 22 degrees in New York."));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_legacy_functions_tool_result_turn() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""function_call":\{"name":"get_weather""#.to_string()),
            Matcher::Regex(r#""role":"function","content":"[^,]*,"name":"get_weather""#.to_string()),
        ]))
        .with_status(200)
        .with_body(text_body("It is 22 degrees in New York."))
        .create_async()
        .await;

    let call = ai_lib_chat::ToolCall::new("get_weather", json!({"location": "NYC"})).with_id("call_1");
    let request = weather_request()
        .message(Message::assistant_tool_call(call))
        .message(Message::tool(Some("call_1".to_string()), "22 celsius"));

    let client = ChatClient::builder()
        .base_url(server.url())
        .api_key("test-key")
        .tool_wire_format(ToolWireFormat::Functions)
        .build()
        .unwrap();
    let result = client.complete(&request).await.unwrap();
    assert_eq!(result.text(), Some("It is 22 degrees in New York."));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(text_body("4"))
        .expect(4)
        .create_async()
        .await;

    let client = Arc::new(client_for(&server.url()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.complete(&math_request()).await })
        })
        .collect();

    for handle in futures::future::join_all(handles).await {
        let result = handle.unwrap().unwrap();
        assert_eq!(result.text(), Some("4"));
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_complete_with_stats() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_header("x-request-id", "upstream-123")
        .with_body(text_body("4"))
        .create_async()
        .await;

    let client = client_for(&server.url());
    let (result, stats) = client.complete_with_stats(&math_request()).await.unwrap();

    assert_eq!(result.text(), Some("4"));
    assert_eq!(stats.http_status, 200);
    assert_eq!(stats.model, "gpt-oss-120b");
    assert_eq!(stats.served_model.as_deref(), Some("gpt-oss-120b"));
    assert_eq!(stats.finish_reason.as_deref(), Some("stop"));
    assert_eq!(stats.upstream_request_id.as_deref(), Some("upstream-123"));
    assert_eq!(stats.usage.map(|u| u.total_tokens), Some(28));
    assert!(stats.endpoint.ends_with("/chat/completions"));
    assert!(!stats.client_request_id.is_empty());
}
