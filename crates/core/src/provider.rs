//! Provider descriptor: identifies one LLM endpoint.
//!
//! A descriptor is an immutable value: URL, credentials, model and the wire
//! format the endpoint speaks. It is passed by reference into every
//! transport call; nothing in the pipeline mutates or caches it.

use serde::{Deserialize, Serialize};

/// The JSON request/response shape a provider family expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// OpenAI-style `/chat/completions` with system + user messages.
    #[default]
    Chat,
    /// Single-prompt `:generateContent` style (no native system role).
    Generate,
}

impl std::fmt::Display for WireFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireFormat::Chat => f.pad("chat"),
            WireFormat::Generate => f.pad("generate"),
        }
    }
}

/// Everything needed to reach one provider endpoint.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Base URL, without a trailing slash
    pub base_url: String,

    /// API key (bearer token for chat, query key for generate)
    pub api_key: String,

    /// Model identifier (e.g., "gpt-4o-mini", "gemini-2.5-flash")
    pub model: String,

    /// Which wire format the endpoint speaks
    #[serde(default)]
    pub wire_format: WireFormat,

    /// Sampling temperature override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Output token cap override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ProviderDescriptor {
    /// Create a descriptor with no overrides. Trailing slashes are stripped
    /// from the URL.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        wire_format: WireFormat,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            wire_format,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the temperature override.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the output token cap override.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Whether any generation override is present.
    pub fn has_overrides(&self) -> bool {
        self.temperature.is_some() || self.max_tokens.is_some()
    }
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("wire_format", &self.wire_format)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
