//! `promptlift enhance` — Rewrite a prompt using conversation history.

use promptlift_config::{AppConfig, ConfigError};
use promptlift_core::message::Message;
use promptlift_core::provider::ProviderDescriptor;
use promptlift_enhancer::PromptEnhancer;
use promptlift_providers::HttpTransport;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub struct EnhanceArgs {
    pub prompt: String,
    pub history: Option<PathBuf>,
    pub project_context: Option<PathBuf>,
    pub provider: Option<String>,
}

pub async fn run(args: EnhanceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let provider_name = args.provider.as_deref().unwrap_or(&config.default_provider);
    let descriptor = resolve_provider(&config, args.provider.as_deref())?;

    if descriptor.api_key.is_empty() {
        tracing::warn!(
            provider = %provider_name,
            "No API key configured; set PROMPTLIFT_API_KEY or providers.{provider_name}.api_key"
        );
    }

    let messages = match &args.history {
        Some(path) => load_history(path)?,
        None => Vec::new(),
    };

    let project_context = match &args.project_context {
        Some(path) => Some(std::fs::read_to_string(path).map_err(|e| {
            format!("Failed to read project context {}: {e}", path.display())
        })?),
        None => None,
    };

    let transport =
        HttpTransport::with_timeout(Duration::from_secs(config.request_timeout_secs))?;
    let enhancer = PromptEnhancer::new(Arc::new(transport))
        .with_context_config(config.context)
        .with_limits(config.limits);

    tracing::debug!(
        provider = %provider_name,
        model = %descriptor.model,
        wire_format = %descriptor.wire_format,
        history = messages.len(),
        "Enhancing prompt"
    );

    match enhancer
        .enhance(
            &messages,
            &args.prompt,
            &descriptor,
            project_context.as_deref(),
        )
        .await
    {
        Ok(enhanced) => {
            println!("{enhanced}");
            Ok(())
        }
        Err(e) => {
            // The caller keeps the original prompt when enhancement fails
            eprintln!("{}", args.prompt);
            Err(e.into())
        }
    }
}

/// The named provider, or the configured default when none is named.
fn resolve_provider(
    config: &AppConfig,
    name: Option<&str>,
) -> Result<ProviderDescriptor, ConfigError> {
    match name {
        Some(name) => config.provider_descriptor(name),
        None => config.default_descriptor(),
    }
}

/// Read a conversation history file: a JSON array of messages.
fn load_history(path: &Path) -> Result<Vec<Message>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read history {}: {e}", path.display()))?;
    let messages: Vec<Message> = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse history {}: {e}", path.display()))?;
    Ok(messages)
}
