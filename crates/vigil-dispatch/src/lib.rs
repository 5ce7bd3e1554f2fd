//! Event dispatch: the audit pipeline orchestrator.
//!
//! [`Dispatcher::handle`] runs one event through the full pipeline:
//! resolve the tenant's destination, render the audit text, shape it into a
//! delivery payload, and invoke the send primitive. Every step's failure is
//! terminal for that single call; nothing is retried and no state outlives
//! the call except the shared routing table.
//!
//! The [`intake`] module carries the adapter-facing helpers: converting raw
//! gateway JSON into [`vigil_types::EventContent`] and the fixed literal
//! phrases for events that only guarantee a couple of fields.

pub mod intake;

mod dispatcher;

pub use dispatcher::{Delivery, DispatchError, Dispatcher};
