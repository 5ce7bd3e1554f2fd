//! Shared types, identifiers, and constants for the Vigil audit relay.
//!
//! This crate provides the foundational types used across all Vigil crates:
//! the ordered [`Record`] model that lifecycle snapshots are expressed in,
//! the [`Snapshot`] and [`EventContent`] wrappers that make partial and
//! literal event payloads explicit, the static [`EventKind`] table for the
//! platform's lifecycle events, and the validated [`TenantId`] /
//! [`DestinationId`] newtypes.
//!
//! No crate in the workspace depends on anything *except* `vigil-types` for
//! cross-cutting type definitions. This keeps the dependency graph clean and
//! prevents circular dependencies.

mod event;
mod id;
mod record;

pub use event::{EventKind, ParseEventKindError};
pub use id::{DestinationId, ParseIdError, TenantId};
pub use record::{EventContent, FieldValue, Record, Scalar, Snapshot};
