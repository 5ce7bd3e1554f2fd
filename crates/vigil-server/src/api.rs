//! Request handlers for event intake and route management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use vigil_dispatch::{intake, DispatchError};
use vigil_types::{EventKind, TenantId};

use crate::AppState;

/// One gateway event, as posted by the adapter.
#[derive(Debug, Deserialize)]
pub struct EventRequest {
    /// Canonical event name (e.g. `GUILD_ROLE_UPDATE`).
    pub event: String,
    /// The tenant the event belongs to.
    pub tenant_id: String,
    /// The new record or literal content.
    pub content: Value,
    /// The prior snapshot, when the gateway supplies one.
    #[serde(default)]
    pub previous: Option<Value>,
    /// Marks `previous` as carrying only guaranteed fields.
    #[serde(default)]
    pub previous_partial: bool,
}

/// A tenant routing entry.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Tenant id (numeric string).
    pub tenant_id: String,
    /// Destination id (numeric string).
    pub destination_id: String,
}

/// Error response with an HTTP status and JSON body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // A 204 must not carry a body.
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<DispatchError> for ApiError {
    fn from(error: DispatchError) -> Self {
        let status = match &error {
            DispatchError::NotConfigured(_) => StatusCode::NOT_FOUND,
            DispatchError::DestinationUnavailable(_) | DispatchError::Send(_) => {
                StatusCode::BAD_GATEWAY
            }
            // Handled before conversion in `post_event`; kept total so the
            // conversion stays a valid response on its own.
            DispatchError::NothingToLog => StatusCode::NO_CONTENT,
        };
        Self::new(status, error.to_string())
    }
}

/// Health check handler.
///
/// Returns `200 OK` with server status and version. Used by monitoring and
/// CI to verify the server is running.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Event intake: runs one gateway event through the audit pipeline.
///
/// Responds `200` with the delivery outcome, `204` when there was nothing
/// to log, `400` for malformed ids or unknown event names, `404` for an
/// unconfigured tenant, and `502` when the destination is gone or the send
/// primitive failed.
pub async fn post_event(
    State(state): State<AppState>,
    Json(request): Json<EventRequest>,
) -> Result<Response, ApiError> {
    let kind: EventKind = request
        .event
        .parse()
        .map_err(|e: vigil_types::ParseEventKindError| ApiError::bad_request(e.to_string()))?;
    let tenant: TenantId = request
        .tenant_id
        .parse()
        .map_err(|e: vigil_types::ParseIdError| ApiError::bad_request(e.to_string()))?;

    let content = intake::content_from_json(kind, &request.content);
    let previous = intake::snapshot_from_json(request.previous.as_ref(), request.previous_partial);

    match state
        .dispatcher
        .handle(kind, &tenant, &content, previous.as_ref())
        .await
    {
        Ok(delivery) => Ok((
            StatusCode::OK,
            Json(json!({
                "destination": delivery.destination.as_str(),
                "payload": delivery.payload_kind.as_str(),
            })),
        )
            .into_response()),
        Err(DispatchError::NothingToLog) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(error) => Err(ApiError::from(error)),
    }
}

/// Registers (or overwrites) a tenant route at runtime.
pub async fn put_route(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Response, ApiError> {
    state
        .registry
        .register(&request.tenant_id, &request.destination_id)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    tracing::info!(
        tenant = %request.tenant_id,
        destination = %request.destination_id,
        "route registered"
    );
    Ok((
        StatusCode::OK,
        Json(json!({ "tenant_id": request.tenant_id, "destination_id": request.destination_id })),
    )
        .into_response())
}

/// Removes a tenant route. Idempotent: always responds `204`.
pub async fn delete_route(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> StatusCode {
    if state.registry.unregister(&tenant) {
        tracing::info!(tenant = %tenant, "route unregistered");
    }
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn nothing_to_log_converts_to_a_bodyless_no_content() {
        let response = ApiError::from(DispatchError::NothingToLog).into_response();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn error_responses_carry_a_json_body() {
        let response = ApiError::bad_request("unknown event kind").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "unknown event kind");
    }
}
