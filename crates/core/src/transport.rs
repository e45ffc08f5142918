//! Transport trait: the abstraction over one provider exchange.
//!
//! A Transport sends a system instruction and a user instruction to the
//! endpoint a `ProviderDescriptor` describes and returns the raw text reply.
//!
//! Implementations: HTTP (chat-style and generate-style wire formats) in
//! `promptlift-providers`, scripted transports in tests.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::provider::ProviderDescriptor;

/// The core Transport trait.
///
/// One call is one request/response round trip. Implementations perform no
/// retries; the caller decides what a failure means.
#[async_trait]
pub trait Transport: Send + Sync {
    /// A human-readable name for this transport (e.g., "http", "scripted").
    fn name(&self) -> &str;

    /// Send one exchange and return the provider's raw text.
    ///
    /// Fails with `TransportError::Status` on a non-success HTTP status and
    /// `TransportError::EmptyResponse` when the expected text field is
    /// missing or empty.
    async fn send(
        &self,
        provider: &ProviderDescriptor,
        system_instruction: &str,
        user_instruction: &str,
    ) -> std::result::Result<String, TransportError>;
}
