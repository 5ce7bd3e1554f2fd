//! The per-event dispatch pipeline.

use std::sync::Arc;

use vigil_deliver::{shape, DeliverySink, PayloadKind, SendError};
use vigil_registry::{DestinationRegistry, RegistryError};
use vigil_render::Renderer;
use vigil_types::{DestinationId, EventContent, EventKind, Snapshot, TenantId};

/// Footer shown on rich delivery payloads.
const RICH_FOOTER: &str = "vigil audit";

/// Errors terminating a single dispatch call.
///
/// No variant is retried internally, and none affects the registry or
/// future calls.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The tenant has no configured destination. Permanent until an
    /// operator registers one.
    #[error("no destination configured for tenant {0}")]
    NotConfigured(TenantId),

    /// The resolved destination no longer exists on the remote platform.
    #[error("destination {0} is no longer available")]
    DestinationUnavailable(DestinationId),

    /// The rendered body was empty. An expected, non-exceptional outcome:
    /// there was nothing to report, and no send was attempted.
    #[error("nothing to log for this event")]
    NothingToLog,

    /// The send primitive failed; surfaced verbatim.
    #[error("send failed: {0}")]
    Send(#[source] SendError),
}

/// A successful delivery outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    /// Where the record was sent.
    pub destination: DestinationId,
    /// Which payload variant was chosen.
    pub payload_kind: PayloadKind,
}

/// Orchestrates the audit pipeline for each incoming event.
///
/// Owns no per-call state; the only shared state is the routing table
/// behind an `Arc`, so a dispatcher can be cloned cheaply into however many
/// event callbacks the gateway runs.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<DestinationRegistry>,
    renderer: Renderer,
    sink: Arc<dyn DeliverySink>,
}

impl Dispatcher {
    /// Creates a dispatcher over a routing table and a send primitive.
    pub fn new(registry: Arc<DestinationRegistry>, sink: Arc<dyn DeliverySink>) -> Self {
        Self {
            registry,
            renderer: Renderer::new(),
            sink,
        }
    }

    /// Replaces the default renderer (e.g. to change the volatile field
    /// set of the underlying differ).
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Runs one event through resolve → render → shape → send.
    ///
    /// A call abandoned before the send step has no externally visible
    /// effect; once the send is issued, cancellation semantics belong to
    /// the sink.
    pub async fn handle(
        &self,
        kind: EventKind,
        tenant: &TenantId,
        content: &EventContent,
        previous: Option<&Snapshot>,
    ) -> Result<Delivery, DispatchError> {
        let destination = self.registry.resolve(tenant).map_err(|e| match e {
            RegistryError::NotConfigured(tenant) => DispatchError::NotConfigured(tenant),
            // resolve only fails with NotConfigured; keep the fallback total.
            other => {
                tracing::error!(error = %other, "unexpected registry error during resolve");
                DispatchError::NotConfigured(tenant.clone())
            }
        })?;

        let message = self.renderer.render(kind, tenant, content, previous);
        if message.body.is_empty() {
            tracing::debug!(event = %kind, tenant = %tenant, "empty audit body, nothing to log");
            return Err(DispatchError::NothingToLog);
        }

        let payload = shape(&message, kind.color(), RICH_FOOTER);
        let payload_kind = payload.kind();

        match self.sink.send(&destination, payload).await {
            Ok(()) => {
                tracing::info!(
                    event = %kind,
                    tenant = %tenant,
                    destination = %destination,
                    payload = payload_kind.as_str(),
                    "audit record delivered"
                );
                Ok(Delivery {
                    destination,
                    payload_kind,
                })
            }
            Err(SendError::UnknownDestination(destination)) => {
                tracing::warn!(
                    event = %kind,
                    tenant = %tenant,
                    destination = %destination,
                    "destination vanished from the platform"
                );
                Err(DispatchError::DestinationUnavailable(destination))
            }
            Err(error) => {
                tracing::warn!(event = %kind, tenant = %tenant, error = %error, "send failed");
                Err(DispatchError::Send(error))
            }
        }
    }
}
