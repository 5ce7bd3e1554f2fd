//! Renders lifecycle events into human-readable audit text.
//!
//! An event arrives either as a pre-built literal phrase or as a structured
//! snapshot. Structured content is diffed against the prior snapshot and
//! each change becomes one or more lines of text; when there is no diff to
//! show, the whole record is serialised instead. Rendering never fails: the
//! worst case is an empty body, which the dispatcher treats as "nothing to
//! report".

mod format;
mod message;

pub use format::{format_value, serialize_record};
pub use message::AuditMessage;

use vigil_diff::{DiffSet, Differ, FieldChange};
use vigil_types::{EventContent, EventKind, Snapshot, TenantId};

/// Turns events into [`AuditMessage`]s.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    differ: Differ,
}

impl Renderer {
    /// Creates a renderer with the default differ.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer with a custom differ (e.g. a different volatile
    /// field set).
    pub fn with_differ(differ: Differ) -> Self {
        Self { differ }
    }

    /// Renders an event into an audit message.
    ///
    /// The title is always the event name. Literal content becomes the body
    /// verbatim. Structured content renders its diff against `previous`, or
    /// falls back to serialising the whole record when the diff is empty
    /// (no prior snapshot, or no detected change).
    pub fn render(
        &self,
        kind: EventKind,
        tenant: &TenantId,
        content: &EventContent,
        previous: Option<&Snapshot>,
    ) -> AuditMessage {
        let body = match content {
            EventContent::Literal(text) => text.clone(),
            EventContent::Snapshot(snapshot) => {
                let diff = self.differ.diff(snapshot.record(), previous);
                if diff.is_empty() {
                    serialize_record(snapshot.record())
                } else {
                    render_diff(&diff)
                }
            }
        };

        AuditMessage {
            event_name: kind.as_str().to_string(),
            tenant_id: tenant.clone(),
            title: kind.as_str().to_string(),
            body,
        }
    }
}

/// Renders a diff set into newline-joined lines, one group per change, in
/// discovery order.
pub fn render_diff(diff: &DiffSet) -> String {
    let mut lines: Vec<String> = Vec::new();
    for (path, change) in diff.iter() {
        match change {
            FieldChange::Added(value) => {
                lines.push(format!("{path} added: {}", format_value(value)));
            }
            FieldChange::Removed(value) => {
                lines.push(format!("{path} removed: {}", format_value(value)));
            }
            FieldChange::Modified { old, new } => {
                lines.push(format!("{path} changed:"));
                lines.push(format!("Old: {}", format_value(old)));
                lines.push(format!("New: {}", format_value(new)));
            }
            FieldChange::ListDelta { added, removed } => {
                if !added.is_empty() {
                    lines.push(format!("{path} added: {}", format::format_items(added)));
                }
                if !removed.is_empty() {
                    lines.push(format!("{path} removed: {}", format::format_items(removed)));
                }
            }
        }
    }
    lines.join("\n")
}
