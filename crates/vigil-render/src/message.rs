//! The rendered audit record.

use serde::Serialize;
use vigil_types::TenantId;

/// A rendered audit record, immutable once constructed.
///
/// Transient: built and consumed within a single dispatch call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditMessage {
    /// Canonical event name (e.g. `GUILD_ROLE_UPDATE`).
    pub event_name: String,
    /// The tenant the event belongs to.
    pub tenant_id: TenantId,
    /// Title for the delivered record; always the event name.
    pub title: String,
    /// Human-readable body text.
    pub body: String,
}
