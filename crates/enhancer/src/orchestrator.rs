//! Stage 2: the enhancement orchestrator.
//!
//! Linear pipeline per call:
//!
//! 1. Reject an empty prompt
//! 2. Filter history to meaningful messages
//! 3. If more than `max_messages` remain, run the context selector
//!    (which degrades silently on failure); otherwise format them directly
//! 4. Append the optional project context as one more entry
//! 5. Apply request size limits and call the provider once to rewrite the prompt
//! 6. Clean and return the rewritten prompt
//!
//! A failure in step 5 is terminal: there is no safe substitute for a
//! rewritten prompt, so the caller gets `EnhanceError::EnhancementFailed`.

use promptlift_config::{ContextConfig, EnhancementLimits};
use promptlift_core::error::{EnhanceError, TransportError};
use promptlift_core::message::{meaningful, Message};
use promptlift_core::provider::ProviderDescriptor;
use promptlift_core::Transport;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cleanup::clean_enhanced_output;
use crate::prompts::{enhancement_request, ENHANCEMENT_SYSTEM_PROMPT};
use crate::selector::{format_entry, ContextSelector, ContextSource, Selection};
use crate::truncate::truncate_with_notice;

const PROMPT_TRUNCATED_NOTICE: &str = "...\n\n[Prompt too long, truncated]";
const CONTEXT_TRUNCATED_NOTICE: &str = "\n\n[Context too long, truncated]";
const PROJECT_CONTEXT_TRUNCATED_NOTICE: &str = "...\n\n[Project context too long, truncated]";

/// Separator between context entries in the enhancement request.
pub const ENTRY_SEPARATOR: &str = "\n---\n";

/// Rewrites prompts using a relevant slice of the conversation history.
pub struct PromptEnhancer {
    transport: Arc<dyn Transport>,
    selector: ContextSelector,
    context: ContextConfig,
    limits: EnhancementLimits,
}

impl PromptEnhancer {
    /// Create an enhancer with default context and size limits.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            selector: ContextSelector::new(transport.clone()),
            transport,
            context: ContextConfig::default(),
            limits: EnhancementLimits::default(),
        }
    }

    /// Set the context selection limits.
    pub fn with_context_config(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }

    /// Set the request size limits.
    pub fn with_limits(mut self, limits: EnhancementLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Build the context entries for `current_prompt` from `messages`.
    ///
    /// Runs the selection stage only when the meaningful history exceeds
    /// `max_messages`. Both paths apply the same per-role truncation.
    pub async fn assemble_context(
        &self,
        messages: &[Message],
        current_prompt: &str,
        provider: &ProviderDescriptor,
    ) -> Selection {
        let candidates = meaningful(messages);

        debug!(
            total = messages.len(),
            meaningful = candidates.len(),
            max_messages = self.context.max_messages,
            "Assembling enhancement context"
        );

        if candidates.len() > self.context.max_messages {
            return self
                .selector
                .select(&candidates, current_prompt, provider, &self.context)
                .await;
        }

        Selection {
            entries: candidates
                .iter()
                .map(|m| format_entry(m, &self.context))
                .collect(),
            source: ContextSource::Direct,
        }
    }

    /// Enhance `current_prompt` using `messages` as history and optional
    /// project context.
    pub async fn enhance(
        &self,
        messages: &[Message],
        current_prompt: &str,
        provider: &ProviderDescriptor,
        project_context: Option<&str>,
    ) -> Result<String, EnhanceError> {
        let prompt = current_prompt.trim();
        if prompt.is_empty() {
            return Err(EnhanceError::EmptyPrompt);
        }

        let selection = self.assemble_context(messages, prompt, provider).await;
        let source = selection.source;
        let mut entries = selection.entries;

        if let Some(project) = project_context.map(str::trim).filter(|p| !p.is_empty()) {
            let (project, truncated) = truncate_with_notice(
                project,
                self.limits.max_project_context_length,
                PROJECT_CONTEXT_TRUNCATED_NOTICE,
            );
            if truncated {
                warn!(
                    limit = self.limits.max_project_context_length,
                    "Project context too long, truncated"
                );
            }
            entries.push(format!("Project context:\n{project}"));
        }

        let request = self.build_request(prompt, &entries)?;

        info!(
            ?source,
            entries = entries.len(),
            prompt_chars = prompt.chars().count(),
            request_chars = request.chars().count(),
            "Sending enhancement request"
        );

        let raw = self
            .transport
            .send(provider, ENHANCEMENT_SYSTEM_PROMPT, &request)
            .await
            .map_err(EnhanceError::EnhancementFailed)?;

        let enhanced = clean_enhanced_output(&raw);
        if enhanced.is_empty() {
            return Err(EnhanceError::EnhancementFailed(TransportError::EmptyResponse));
        }

        info!(
            original_chars = prompt.chars().count(),
            enhanced_chars = enhanced.chars().count(),
            "Prompt enhanced"
        );

        Ok(enhanced)
    }

    /// Assemble the stage-2 user instruction, enforcing the size limits.
    fn build_request(&self, prompt: &str, entries: &[String]) -> Result<String, EnhanceError> {
        let (prompt, prompt_truncated) =
            truncate_with_notice(prompt, self.limits.max_prompt_length, PROMPT_TRUNCATED_NOTICE);

        let joined = entries.join(ENTRY_SEPARATOR);
        let (context, context_truncated) = truncate_with_notice(
            &joined,
            self.limits.max_context_length,
            CONTEXT_TRUNCATED_NOTICE,
        );

        if prompt_truncated || context_truncated {
            warn!(
                prompt = prompt_truncated,
                context = context_truncated,
                "Enhancement input truncated"
            );
        }

        let request = enhancement_request(&prompt, &context);

        let total = ENHANCEMENT_SYSTEM_PROMPT.chars().count() + request.chars().count();
        if total > self.limits.max_total_length {
            warn!(
                total,
                limit = self.limits.max_total_length,
                "Enhancement request exceeds the total length limit"
            );
            return Err(EnhanceError::RequestTooLong {
                length: total,
                limit: self.limits.max_total_length,
            });
        }

        Ok(request)
    }
}
