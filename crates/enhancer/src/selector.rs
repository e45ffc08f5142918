//! Stage 1: model-assisted context selection.
//!
//! The model sees a compact digest (index, role letter, first 120
//! characters) rather than full message bodies, answers with indices, and
//! the selector maps them back to the source messages in chronological
//! order. Transport failures degrade to the most recent messages; callers
//! never see an error from this stage.

use promptlift_config::ContextConfig;
use promptlift_core::message::Message;
use promptlift_core::provider::ProviderDescriptor;
use promptlift_core::Transport;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::index_parser::{most_recent, parse_indices};
use crate::prompts::{selection_request, SELECTION_SYSTEM_PROMPT};
use crate::truncate::{take_chars, truncate, ELLIPSIS};

/// Characters of each message shown to the selection model.
pub const DIGEST_PREVIEW_CHARS: usize = 120;

/// How a set of context entries was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextSource {
    /// History was short enough to forward whole; no model call.
    Direct,
    /// The selection model picked the entries.
    Selected,
    /// The selection call failed; the most recent messages were used.
    Degraded,
}

/// Formatted context entries plus how they were produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// `"<role-label>: <truncated text>"`, in original chronological order.
    pub entries: Vec<String>,
    pub source: ContextSource,
}

/// Picks the history entries most relevant to a new prompt.
pub struct ContextSelector {
    transport: Arc<dyn Transport>,
}

impl ContextSelector {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Select at most `config.max_messages` of `messages` for `current_prompt`.
    ///
    /// `messages` should already be filtered to meaningful messages; indices
    /// in the digest refer to positions in this slice.
    pub async fn select(
        &self,
        messages: &[&Message],
        current_prompt: &str,
        provider: &ProviderDescriptor,
        config: &ContextConfig,
    ) -> Selection {
        let max_count = config.max_messages;
        let digest = build_digest(messages);
        let request = selection_request(current_prompt, &digest, max_count);

        debug!(
            transport = %self.transport.name(),
            model = %provider.model,
            candidates = messages.len(),
            max_count,
            "Requesting context selection"
        );

        match self
            .transport
            .send(provider, SELECTION_SYSTEM_PROMPT, &request)
            .await
        {
            Ok(raw) => {
                let indices = parse_indices(&raw, messages.len(), max_count);
                info!(
                    selected = indices.len(),
                    candidates = messages.len(),
                    "Context selection complete"
                );
                Selection {
                    entries: format_selected(messages, &indices, config),
                    source: ContextSource::Selected,
                }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = max_count.min(messages.len()),
                    "Context selection failed, using most recent messages"
                );
                let indices = most_recent(messages.len(), max_count);
                Selection {
                    entries: format_selected(messages, &indices, config),
                    source: ContextSource::Degraded,
                }
            }
        }
    }
}

/// Build the enumerated digest the selection model sees:
/// one `[index] <role-letter>: <preview>` line per message.
pub fn build_digest(messages: &[&Message]) -> String {
    messages
        .iter()
        .enumerate()
        .map(|(i, m)| format!("[{}] {}: {}", i, m.role.letter(), preview(m.text())))
        .collect::<Vec<_>>()
        .join("\n")
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > DIGEST_PREVIEW_CHARS {
        format!("{}{}", take_chars(&flat, DIGEST_PREVIEW_CHARS), ELLIPSIS)
    } else {
        flat
    }
}

/// Format one message as a context entry, truncated to its role's limit.
pub fn format_entry(message: &Message, config: &ContextConfig) -> String {
    let limit = config.max_length_for(message.role);
    format!("{}: {}", message.role.label(), truncate(message.text(), limit))
}

/// Map indices back to messages and format them in original order,
/// regardless of the order the indices arrived in.
pub fn format_selected(
    messages: &[&Message],
    indices: &[usize],
    config: &ContextConfig,
) -> Vec<String> {
    let mut ordered: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| i < messages.len())
        .collect();
    ordered.sort_unstable();
    ordered.dedup();

    ordered
        .into_iter()
        .map(|i| format_entry(messages[i], config))
        .collect()
}
