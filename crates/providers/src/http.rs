//! HTTP transport: dispatches each exchange to the descriptor's wire format.

use async_trait::async_trait;
use promptlift_core::error::TransportError;
use promptlift_core::provider::{ProviderDescriptor, WireFormat};
use std::time::Duration;
use tracing::warn;

use crate::{chat, generate};

/// A `Transport` that speaks both wire formats over one `reqwest` client.
///
/// Holds no per-provider state; the descriptor passed to each call decides
/// URL, auth and body shape.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default timeout (120s).
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(120))
    }

    /// Create a transport whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl promptlift_core::Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(
        &self,
        provider: &ProviderDescriptor,
        system_instruction: &str,
        user_instruction: &str,
    ) -> std::result::Result<String, TransportError> {
        match provider.wire_format {
            WireFormat::Chat => {
                chat::send(&self.client, provider, system_instruction, user_instruction).await
            }
            WireFormat::Generate => {
                generate::send(&self.client, provider, system_instruction, user_instruction).await
            }
        }
    }
}

/// Read the body of a successful response, or turn a non-success status into
/// `TransportError::Status` carrying the error body.
pub(crate) async fn read_success_body(response: reqwest::Response) -> Result<String, TransportError> {
    let status = response.status();

    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %error_body, "Provider returned error");
        return Err(TransportError::Status {
            status: status.as_u16(),
            body: error_body,
        });
    }

    response
        .text()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptlift_core::Transport;

    #[test]
    fn transport_constructs_with_custom_timeout() {
        let transport = HttpTransport::with_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(transport.name(), "http");
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        // Reserve a free port, then release it so nothing is listening there.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let transport = HttpTransport::with_timeout(Duration::from_secs(2)).unwrap();
        let provider = ProviderDescriptor::new(
            format!("http://127.0.0.1:{port}"),
            "k",
            "m",
            WireFormat::Chat,
        );
        let err = transport.send(&provider, "s", "u").await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
