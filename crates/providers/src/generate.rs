//! Generate-style wire format (`models/{model}:generateContent`).
//!
//! The endpoint has no system role in this shape, so the system and user
//! instructions are concatenated into a single text part. Auth is a `key`
//! query parameter. Response text is read from
//! `candidates[0].content.parts[0].text`.

use promptlift_core::error::TransportError;
use promptlift_core::provider::ProviderDescriptor;
use serde::Deserialize;
use tracing::debug;

use crate::http::read_success_body;

/// Build the endpoint URL (without the key query parameter).
pub fn endpoint(provider: &ProviderDescriptor) -> String {
    format!("{}/models/{}:generateContent", provider.base_url, provider.model)
}

/// Join the two instructions into the single prompt this format accepts.
pub fn combined_prompt(system_instruction: &str, user_instruction: &str) -> String {
    if system_instruction.trim().is_empty() {
        return user_instruction.to_string();
    }
    format!("{system_instruction}\n\n{user_instruction}")
}

/// Build the JSON request body. `generationConfig` is present only when
/// the descriptor carries an override.
pub fn request_body(
    provider: &ProviderDescriptor,
    system_instruction: &str,
    user_instruction: &str,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "contents": [{
            "parts": [{ "text": combined_prompt(system_instruction, user_instruction) }]
        }],
    });

    if provider.has_overrides() {
        let mut generation_config = serde_json::Map::new();
        if let Some(temperature) = provider.temperature {
            generation_config.insert("temperature".into(), serde_json::json!(temperature));
        }
        if let Some(max_tokens) = provider.max_tokens {
            generation_config.insert("maxOutputTokens".into(), serde_json::json!(max_tokens));
        }
        body["generationConfig"] = serde_json::Value::Object(generation_config);
    }

    body
}

/// Extract the first candidate's first text part from a raw response body.
pub fn extract_text(raw: &str) -> Result<String, TransportError> {
    let response: GenerateResponse =
        serde_json::from_str(raw).map_err(|e| TransportError::Decode(e.to_string()))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(TransportError::EmptyResponse)
}

/// Perform one generate-style exchange.
pub(crate) async fn send(
    client: &reqwest::Client,
    provider: &ProviderDescriptor,
    system_instruction: &str,
    user_instruction: &str,
) -> Result<String, TransportError> {
    let url = endpoint(provider);
    let body = request_body(provider, system_instruction, user_instruction);

    debug!(model = %provider.model, url = %url, "Sending generate content request");

    let response = client
        .post(&url)
        .query(&[("key", provider.api_key.as_str())])
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    let raw = read_success_body(response).await?;
    extract_text(&raw)
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}
