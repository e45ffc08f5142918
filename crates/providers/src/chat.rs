//! Chat-style wire format (OpenAI-compatible `/chat/completions`).
//!
//! Works with: OpenAI, OpenRouter, DeepSeek, Groq, Ollama, vLLM and any
//! other endpoint that speaks the chat completions shape.
//!
//! Request: `{model, messages: [system, user], stream: false, temperature?, max_tokens?}`
//! with a bearer token. Response text is read from `choices[0].message.content`.

use promptlift_core::error::TransportError;
use promptlift_core::provider::ProviderDescriptor;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::read_success_body;

/// Build the endpoint URL for a chat provider.
pub fn endpoint(provider: &ProviderDescriptor) -> String {
    format!("{}/chat/completions", provider.base_url)
}

/// Build the JSON request body. Overrides are included only when present.
pub fn request_body(
    provider: &ProviderDescriptor,
    system_instruction: &str,
    user_instruction: &str,
) -> serde_json::Value {
    let messages = vec![
        ApiMessage {
            role: "system".into(),
            content: Some(system_instruction.to_string()),
        },
        ApiMessage {
            role: "user".into(),
            content: Some(user_instruction.to_string()),
        },
    ];

    let mut body = serde_json::json!({
        "model": provider.model,
        "messages": messages,
        "stream": false,
    });

    if let Some(temperature) = provider.temperature {
        body["temperature"] = serde_json::json!(temperature);
    }

    if let Some(max_tokens) = provider.max_tokens {
        body["max_tokens"] = serde_json::json!(max_tokens);
    }

    body
}

/// Extract the first choice's message content from a raw response body.
pub fn extract_text(raw: &str) -> Result<String, TransportError> {
    let api_response: ApiResponse =
        serde_json::from_str(raw).map_err(|e| TransportError::Decode(e.to_string()))?;

    api_response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(TransportError::EmptyResponse)
}

/// Perform one chat-style exchange.
pub(crate) async fn send(
    client: &reqwest::Client,
    provider: &ProviderDescriptor,
    system_instruction: &str,
    user_instruction: &str,
) -> Result<String, TransportError> {
    let url = endpoint(provider);
    let body = request_body(provider, system_instruction, user_instruction);

    debug!(model = %provider.model, url = %url, "Sending chat completion request");

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", provider.api_key))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    let raw = read_success_body(response).await?;
    extract_text(&raw)
}

// --- Wire types ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptlift_core::provider::WireFormat;

    fn provider() -> ProviderDescriptor {
        ProviderDescriptor::new("https://api.openai.com/v1", "sk-test", "gpt-4o-mini", WireFormat::Chat)
    }

    #[test]
    fn endpoint_appends_chat_path() {
        assert_eq!(endpoint(&provider()), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn body_has_system_then_user() {
        let body = request_body(&provider(), "be terse", "hello");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be terse");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hello");
    }

    #[test]
    fn body_omits_absent_overrides() {
        let body = request_body(&provider(), "s", "u");
        assert!(body.get("temperature").is_none());
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn body_includes_present_overrides() {
        let p = provider().with_temperature(0.3).with_max_tokens(256);
        let body = request_body(&p, "s", "u");
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert_eq!(body["max_tokens"], 256);
    }

    #[test]
    fn extracts_first_choice_content() {
        let raw = r#"{"model":"gpt-4o-mini","choices":[{"message":{"role":"assistant","content":"[1,2]"}},{"message":{"role":"assistant","content":"ignored"}}]}"#;
        assert_eq!(extract_text(raw).unwrap(), "[1,2]");
    }

    #[test]
    fn missing_choices_is_empty_response() {
        assert_eq!(extract_text(r#"{"choices":[]}"#), Err(TransportError::EmptyResponse));
        assert_eq!(extract_text(r#"{}"#), Err(TransportError::EmptyResponse));
    }

    #[test]
    fn null_or_blank_content_is_empty_response() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(extract_text(raw), Err(TransportError::EmptyResponse));
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"  "}}]}"#;
        assert_eq!(extract_text(raw), Err(TransportError::EmptyResponse));
    }

    #[test]
    fn malformed_body_is_decode_error() {
        assert!(matches!(extract_text("<html>"), Err(TransportError::Decode(_))));
    }
}
