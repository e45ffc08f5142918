//! Wire-level tests for `HttpTransport` against a local HTTP double.

use promptlift_core::error::TransportError;
use promptlift_core::provider::{ProviderDescriptor, WireFormat};
use promptlift_core::Transport;
use promptlift_providers::HttpTransport;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn chat_exchange_sends_bearer_and_reads_first_choice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "stream": false,
            "messages": [
                {"role": "system", "content": "pick messages"},
                {"role": "user", "content": "prompt + digest"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{"message": {"role": "assistant", "content": "[4, 1]"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ProviderDescriptor::new(
        format!("{}/v1/", server.uri()),
        "sk-test",
        "gpt-4o-mini",
        WireFormat::Chat,
    );
    let transport = HttpTransport::new().unwrap();

    let text = transport
        .send(&provider, "pick messages", "prompt + digest")
        .await
        .unwrap();
    assert_eq!(text, "[4, 1]");
}

#[tokio::test]
async fn chat_non_success_status_carries_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let provider = ProviderDescriptor::new(server.uri(), "k", "m", WireFormat::Chat);
    let transport = HttpTransport::new().unwrap();

    let err = transport.send(&provider, "s", "u").await.unwrap_err();
    assert_eq!(
        err,
        TransportError::Status {
            status: 429,
            body: "slow down".into()
        }
    );
}

#[tokio::test]
async fn chat_empty_content_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": ""}}]
        })))
        .mount(&server)
        .await;

    let provider = ProviderDescriptor::new(server.uri(), "k", "m", WireFormat::Chat);
    let transport = HttpTransport::new().unwrap();

    let err = transport.send(&provider, "s", "u").await.unwrap_err();
    assert_eq!(err, TransportError::EmptyResponse);
}

#[tokio::test]
async fn generate_exchange_uses_query_key_and_generation_config() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "g-key"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "SYS\n\nUSR"}]}],
            "generationConfig": {"maxOutputTokens": 64}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "Rewritten prompt"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ProviderDescriptor::new(
        format!("{}/v1beta", server.uri()),
        "g-key",
        "gemini-2.5-flash",
        WireFormat::Generate,
    )
    .with_max_tokens(64);
    let transport = HttpTransport::new().unwrap();

    let text = transport.send(&provider, "SYS", "USR").await.unwrap();
    assert_eq!(text, "Rewritten prompt");
}

#[tokio::test]
async fn generate_error_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "API key not valid"}
        })))
        .mount(&server)
        .await;

    let provider = ProviderDescriptor::new(server.uri(), "bad", "gemini-2.5-flash", WireFormat::Generate);
    let transport = HttpTransport::new().unwrap();

    match transport.send(&provider, "s", "u").await {
        Err(TransportError::Status { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
