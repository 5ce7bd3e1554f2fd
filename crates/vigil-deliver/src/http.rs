//! HTTP-backed delivery sink.

use async_trait::async_trait;
use vigil_types::DestinationId;

use crate::payload::DeliveryPayload;
use crate::sink::{DeliverySink, SendError};

/// Posts shaped payloads to a platform bridge endpoint.
///
/// The payload is serialised as JSON to `<endpoint>/<destination-id>`. A
/// `404` from the bridge means the destination no longer exists and maps to
/// [`SendError::UnknownDestination`].
#[derive(Debug, Clone)]
pub struct HttpSink {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpSink {
    /// Creates a sink posting to the given bridge endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DeliverySink for HttpSink {
    async fn send(
        &self,
        destination: &DestinationId,
        payload: DeliveryPayload,
    ) -> Result<(), SendError> {
        let url = format!("{}/{}", self.endpoint, destination);
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SendError::UnknownDestination(destination.clone()));
        }
        if !status.is_success() {
            tracing::warn!(%destination, status = status.as_u16(), "bridge rejected payload");
            return Err(SendError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trailing_slash_is_normalised() {
        let sink = HttpSink::new("http://bridge.local/send/");
        assert_eq!(sink.endpoint, "http://bridge.local/send");
    }
}
