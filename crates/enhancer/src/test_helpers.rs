//! Shared test helpers for pipeline tests.

use promptlift_core::error::TransportError;
use promptlift_core::provider::{ProviderDescriptor, WireFormat};
use promptlift_core::Transport;
use std::sync::Mutex;

/// One recorded `send` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
}

/// A transport that returns a sequence of scripted results and records
/// every call it receives.
///
/// Panics if more calls are made than results provided.
pub struct ScriptedTransport {
    results: Mutex<Vec<Result<String, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new(results: Vec<Result<String, TransportError>>) -> Self {
        Self {
            results: Mutex::new(results),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a transport that answers each call with the next text.
    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn send(
        &self,
        _provider: &ProviderDescriptor,
        system_instruction: &str,
        user_instruction: &str,
    ) -> Result<String, TransportError> {
        let mut calls = self.calls.lock().unwrap();
        let mut results = self.results.lock().unwrap();

        if results.is_empty() {
            panic!("ScriptedTransport: no more results (call #{})", calls.len());
        }

        calls.push(RecordedCall {
            system: system_instruction.to_string(),
            user: user_instruction.to_string(),
        });
        results.remove(0)
    }
}

/// A chat-style descriptor pointing nowhere.
pub fn provider() -> ProviderDescriptor {
    ProviderDescriptor::new("http://localhost:0/v1", "test-key", "test-model", WireFormat::Chat)
}
