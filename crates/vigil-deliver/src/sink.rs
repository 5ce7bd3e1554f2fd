//! The external send primitive, as a trait seam.

use async_trait::async_trait;
use vigil_types::DestinationId;

use crate::payload::DeliveryPayload;

/// Errors surfaced by a delivery sink.
///
/// The pipeline performs no retries: every error here is terminal for the
/// dispatch call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    /// The resolved destination no longer exists on the remote platform.
    #[error("destination {0} does not exist on the platform")]
    UnknownDestination(DestinationId),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The platform rejected the payload.
    #[error("destination rejected payload with status {0}")]
    Rejected(u16),
}

/// Delivers a shaped payload to a destination.
///
/// This is the single asynchronous boundary of the audit pipeline. The
/// sink owns all platform protocol detail; the pipeline only constructs
/// the payload and selects the destination. Retry, backoff, and timeout
/// policy belong to the implementation, not the caller.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Sends `payload` to `destination`, surfacing success or failure
    /// verbatim.
    async fn send(
        &self,
        destination: &DestinationId,
        payload: DeliveryPayload,
    ) -> Result<(), SendError>;
}
