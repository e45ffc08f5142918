//! # promptlift enhancer
//!
//! The two-stage pipeline that rewrites a prompt using the relevant part
//! of a conversation history.
//!
//! - **Stage 1** ([`selector`]): when the history is longer than
//!   `max_messages`, a model picks the relevant messages from a compact
//!   digest. Failures degrade to the most recent messages.
//! - **Stage 2** ([`orchestrator`]): the selected context, the optional
//!   project context and the prompt are sent to a model that returns the
//!   rewritten prompt.
//!
//! Both stages talk to providers only through [`promptlift_core::Transport`].

pub mod cleanup;
pub mod index_parser;
pub mod orchestrator;
pub mod prompts;
pub mod selector;
pub mod truncate;

#[cfg(test)]
mod test_helpers;

pub use cleanup::clean_enhanced_output;
pub use index_parser::parse_indices;
pub use orchestrator::PromptEnhancer;
pub use selector::{ContextSelector, ContextSource, Selection};
pub use truncate::truncate;
