//! Configuration loading, validation, and management for promptlift.
//!
//! Loads configuration from `~/.promptlift/config.toml` with environment
//! variable overrides. Validates all settings at load time.
//!
//! The pipeline never reads configuration itself: the host loads an
//! `AppConfig` once and threads `ContextConfig`, `EnhancementLimits` and a
//! resolved `ProviderDescriptor` into each call.

use promptlift_core::message::Role;
use promptlift_core::provider::{ProviderDescriptor, WireFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.promptlift/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Provider used when the caller names none
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// HTTP client timeout per request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,

    /// Context selection limits
    #[serde(default)]
    pub context: ContextConfig,

    /// Enhancement request size limits
    #[serde(default)]
    pub limits: EnhancementLimits,
}

fn default_provider() -> String {
    "openai".into()
}
fn default_request_timeout_secs() -> u64 {
    120
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_provider", &self.default_provider)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("providers", &self.providers)
            .field("context", &self.context)
            .field("limits", &self.limits)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("wire_format", &self.wire_format)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// One `[providers.<name>]` table.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// `"chat"` or `"generate"`; inferred from the provider name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_format: Option<WireFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Limits on the conversation context forwarded to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Maximum number of history entries kept
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,

    /// Maximum characters kept from a user message
    #[serde(default = "default_max_user_message_length")]
    pub max_user_message_length: usize,

    /// Maximum characters kept from an assistant message
    #[serde(default = "default_max_assistant_message_length")]
    pub max_assistant_message_length: usize,
}

fn default_max_messages() -> usize {
    10
}
fn default_max_user_message_length() -> usize {
    1000
}
fn default_max_assistant_message_length() -> usize {
    2000
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
            max_user_message_length: default_max_user_message_length(),
            max_assistant_message_length: default_max_assistant_message_length(),
        }
    }
}

impl ContextConfig {
    /// Character limit for a message of the given role. System notices share
    /// the assistant limit.
    pub fn max_length_for(&self, role: Role) -> usize {
        match role {
            Role::User => self.max_user_message_length,
            Role::Assistant | Role::System => self.max_assistant_message_length,
        }
    }
}

/// Size limits on the stage-2 enhancement request, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementLimits {
    #[serde(default = "default_max_prompt_length")]
    pub max_prompt_length: usize,

    #[serde(default = "default_max_context_length")]
    pub max_context_length: usize,

    #[serde(default = "default_max_total_length")]
    pub max_total_length: usize,

    #[serde(default = "default_max_project_context_length")]
    pub max_project_context_length: usize,
}

fn default_max_prompt_length() -> usize {
    50_000
}
fn default_max_context_length() -> usize {
    30_000
}
fn default_max_total_length() -> usize {
    100_000
}
fn default_max_project_context_length() -> usize {
    3_000
}

impl Default for EnhancementLimits {
    fn default() -> Self {
        Self {
            max_prompt_length: default_max_prompt_length(),
            max_context_length: default_max_context_length(),
            max_total_length: default_max_total_length(),
            max_project_context_length: default_max_project_context_length(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.promptlift/config.toml).
    ///
    /// Also checks environment variables:
    /// - `PROMPTLIFT_API_KEY` (used when no key is configured)
    /// - `PROMPTLIFT_PROVIDER` (overrides `default_provider`)
    /// - `PROMPTLIFT_MODEL` (overrides the default provider's model)
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("PROMPTLIFT_API_KEY").ok();
        }

        if let Ok(provider) = std::env::var("PROMPTLIFT_PROVIDER") {
            config.default_provider = provider;
        }

        if let Ok(model) = std::env::var("PROMPTLIFT_MODEL") {
            config
                .providers
                .entry(config.default_provider.clone())
                .or_default()
                .model = Some(model);
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::ParseError { reason, .. } => ConfigError::ParseError {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::new(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".promptlift")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, provider) in &self.providers {
            if let Some(t) = provider.temperature {
                if !(0.0..=2.0).contains(&t) {
                    return Err(ConfigError::ValidationError(format!(
                        "providers.{name}.temperature must be between 0.0 and 2.0"
                    )));
                }
            }
        }

        if self.context.max_messages == 0 {
            return Err(ConfigError::ValidationError(
                "context.max_messages must be at least 1".into(),
            ));
        }

        if self.context.max_user_message_length == 0
            || self.context.max_assistant_message_length == 0
        {
            return Err(ConfigError::ValidationError(
                "context message length limits must be at least 1".into(),
            ));
        }

        let l = &self.limits;
        if l.max_prompt_length == 0
            || l.max_context_length == 0
            || l.max_total_length == 0
            || l.max_project_context_length == 0
        {
            return Err(ConfigError::ValidationError(
                "limits must all be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Resolve the default provider into a descriptor.
    pub fn default_descriptor(&self) -> Result<ProviderDescriptor, ConfigError> {
        self.provider_descriptor(&self.default_provider)
    }

    /// Resolve a named provider into a descriptor.
    ///
    /// Unset fields fall back to the well-known defaults for that provider
    /// name; the API key falls back to the top-level key.
    pub fn provider_descriptor(&self, name: &str) -> Result<ProviderDescriptor, ConfigError> {
        let configured = self.providers.get(name);
        let known = well_known(name);

        if configured.is_none() && known.is_none() {
            return Err(ConfigError::UnknownProvider(name.to_string()));
        }

        let configured = configured.cloned().unwrap_or_default();

        let base_url = configured
            .api_url
            .or_else(|| known.map(|k| k.base_url.to_string()))
            .ok_or_else(|| {
                ConfigError::ValidationError(format!("providers.{name}.api_url is required"))
            })?;

        let model = configured
            .model
            .or_else(|| known.map(|k| k.model.to_string()))
            .ok_or_else(|| {
                ConfigError::ValidationError(format!("providers.{name}.model is required"))
            })?;

        let wire_format = configured
            .wire_format
            .or_else(|| known.map(|k| k.wire_format))
            .unwrap_or_default();

        let api_key = configured
            .api_key
            .or_else(|| self.api_key.clone())
            .unwrap_or_default();

        let mut descriptor = ProviderDescriptor::new(base_url, api_key, model, wire_format);
        descriptor.temperature = configured.temperature;
        descriptor.max_tokens = configured.max_tokens;
        Ok(descriptor)
    }

    /// Names of all providers that can be resolved: configured ones plus the
    /// default provider.
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        if !names.contains(&self.default_provider) {
            names.push(self.default_provider.clone());
        }
        names
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            request_timeout_secs: default_request_timeout_secs(),
            providers: BTreeMap::new(),
            context: ContextConfig::default(),
            limits: EnhancementLimits::default(),
        }
    }
}

/// Built-in endpoint defaults for well-known providers.
#[derive(Debug, Clone, Copy)]
struct KnownProvider {
    base_url: &'static str,
    model: &'static str,
    wire_format: WireFormat,
}

fn well_known(provider_name: &str) -> Option<KnownProvider> {
    let (base_url, model, wire_format) = match provider_name {
        "openai" => ("https://api.openai.com/v1", "gpt-4o-mini", WireFormat::Chat),
        "openrouter" => (
            "https://openrouter.ai/api/v1",
            "openai/gpt-4o-mini",
            WireFormat::Chat,
        ),
        "deepseek" => ("https://api.deepseek.com/v1", "deepseek-chat", WireFormat::Chat),
        "groq" => (
            "https://api.groq.com/openai/v1",
            "llama-3.1-8b-instant",
            WireFormat::Chat,
        ),
        "ollama" => ("http://localhost:11434/v1", "llama3.1", WireFormat::Chat),
        "gemini" => (
            "https://generativelanguage.googleapis.com/v1beta",
            "gemini-2.5-flash",
            WireFormat::Generate,
        ),
        _ => return None,
    };
    Some(KnownProvider {
        base_url,
        model,
        wire_format,
    })
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}
