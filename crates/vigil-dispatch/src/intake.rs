//! Adapter-facing intake helpers.
//!
//! The gateway adapter hands raw JSON to this module, which decides how an
//! event enters the pipeline. Events that guarantee only an identifier and
//! a couple of fields (bans, member removals, message deletions) become
//! fixed literal phrases; everything else becomes a structured snapshot
//! that the differ can compare.

use serde_json::Value;
use vigil_types::{EventContent, EventKind, Record, Snapshot};

/// Literal phrase for a new ban.
pub fn ban_added(user: &str) -> EventContent {
    EventContent::literal(format!("User banned: {user}"))
}

/// Literal phrase for a lifted ban.
pub fn ban_removed(user: &str) -> EventContent {
    EventContent::literal(format!("User unbanned: {user}"))
}

/// Literal phrase for a member leaving or being kicked.
pub fn member_left(user: &str) -> EventContent {
    EventContent::literal(format!("Member left: {user}"))
}

/// Literal phrase for a deleted message.
pub fn message_deleted(channel: &str) -> EventContent {
    EventContent::literal(format!("Message deleted in #{channel}"))
}

/// Builds dispatcher-ready content from a raw gateway payload.
///
/// For literal-phrase events the guaranteed field is extracted from the
/// payload; if it is missing the payload degrades to a structured snapshot
/// rather than failing. JSON strings pass through as literal content, and
/// any other non-object value is rendered via `to_string` so intake never
/// fails.
pub fn content_from_json(kind: EventKind, value: &Value) -> EventContent {
    match kind {
        EventKind::BanAdd => {
            if let Some(user) = guaranteed_field(value, "user") {
                return ban_added(&user);
            }
        }
        EventKind::BanRemove => {
            if let Some(user) = guaranteed_field(value, "user") {
                return ban_removed(&user);
            }
        }
        EventKind::MemberRemove => {
            if let Some(user) = guaranteed_field(value, "user") {
                return member_left(&user);
            }
        }
        EventKind::MessageDelete => {
            if let Some(channel) = guaranteed_field(value, "channel") {
                return message_deleted(&channel);
            }
        }
        _ => {}
    }

    match value {
        Value::String(text) => EventContent::literal(text.clone()),
        Value::Object(_) => match Record::from_json(value) {
            Some(record) => EventContent::full(record),
            None => EventContent::literal(value.to_string()),
        },
        other => EventContent::literal(other.to_string()),
    }
}

/// Builds the optional prior snapshot from a raw gateway payload.
///
/// Returns `None` when the value is absent, null, or not an object (no
/// usable prior record). `partial` marks snapshots where the gateway only
/// guarantees a subset of fields.
pub fn snapshot_from_json(value: Option<&Value>, partial: bool) -> Option<Snapshot> {
    let record = Record::from_json(value?)?;
    Some(if partial {
        Snapshot::Partial(record)
    } else {
        Snapshot::Full(record)
    })
}

fn guaranteed_field(value: &Value, name: &str) -> Option<String> {
    value.get(name)?.as_str().map(|s| s.to_string())
}
