//! HTTP surface for the Vigil audit relay.
//!
//! Exposes the event intake endpoint (the seam where the external gateway
//! adapter hands events over) and the runtime management surface for tenant
//! routing. The pipeline itself lives in `vigil-dispatch`; this crate only
//! parses requests, invokes [`vigil_dispatch::Dispatcher::handle`], and
//! maps outcomes to HTTP statuses.

pub mod api;
pub mod config;

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;
use vigil_dispatch::Dispatcher;
use vigil_registry::DestinationRegistry;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The audit pipeline orchestrator.
    pub dispatcher: Dispatcher,
    /// The tenant routing table, shared with the dispatcher.
    pub registry: Arc<DestinationRegistry>,
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/events", post(api::post_event))
        .route("/routes", put(api::put_route))
        .route("/routes/{tenant}", delete(api::delete_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
