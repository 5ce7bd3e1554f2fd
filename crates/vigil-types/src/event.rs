//! Static table of platform lifecycle events.
//!
//! The mapping of gateway event kind to audit event name is fixed at compile
//! time. Each kind also carries the accent color used when an audit record
//! is shaped as a rich block.

use serde::{Deserialize, Serialize};

/// Accent color for creation events (green).
const COLOR_CREATED: u32 = 0x2ECC71;
/// Accent color for update events (orange).
const COLOR_UPDATED: u32 = 0xE67E22;
/// Accent color for deletions, removals, and bans (red).
const COLOR_REMOVED: u32 = 0xE74C3C;

/// Lifecycle events observed from the remote platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A channel was created.
    #[serde(rename = "CHANNEL_CREATE")]
    ChannelCreate,
    /// A channel's settings changed.
    #[serde(rename = "CHANNEL_UPDATE")]
    ChannelUpdate,
    /// A channel was deleted.
    #[serde(rename = "CHANNEL_DELETE")]
    ChannelDelete,
    /// A role was created.
    #[serde(rename = "GUILD_ROLE_CREATE")]
    RoleCreate,
    /// A role's settings changed.
    #[serde(rename = "GUILD_ROLE_UPDATE")]
    RoleUpdate,
    /// A role was deleted.
    #[serde(rename = "GUILD_ROLE_DELETE")]
    RoleDelete,
    /// A member joined.
    #[serde(rename = "GUILD_MEMBER_ADD")]
    MemberAdd,
    /// A member's profile or roles changed.
    #[serde(rename = "GUILD_MEMBER_UPDATE")]
    MemberUpdate,
    /// A member left or was kicked.
    #[serde(rename = "GUILD_MEMBER_REMOVE")]
    MemberRemove,
    /// A user was banned.
    #[serde(rename = "GUILD_BAN_ADD")]
    BanAdd,
    /// A ban was lifted.
    #[serde(rename = "GUILD_BAN_REMOVE")]
    BanRemove,
    /// A message was edited.
    #[serde(rename = "MESSAGE_UPDATE")]
    MessageUpdate,
    /// A message was deleted.
    #[serde(rename = "MESSAGE_DELETE")]
    MessageDelete,
}

impl EventKind {
    /// Returns the canonical event name used in audit record titles.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChannelCreate => "CHANNEL_CREATE",
            Self::ChannelUpdate => "CHANNEL_UPDATE",
            Self::ChannelDelete => "CHANNEL_DELETE",
            Self::RoleCreate => "GUILD_ROLE_CREATE",
            Self::RoleUpdate => "GUILD_ROLE_UPDATE",
            Self::RoleDelete => "GUILD_ROLE_DELETE",
            Self::MemberAdd => "GUILD_MEMBER_ADD",
            Self::MemberUpdate => "GUILD_MEMBER_UPDATE",
            Self::MemberRemove => "GUILD_MEMBER_REMOVE",
            Self::BanAdd => "GUILD_BAN_ADD",
            Self::BanRemove => "GUILD_BAN_REMOVE",
            Self::MessageUpdate => "MESSAGE_UPDATE",
            Self::MessageDelete => "MESSAGE_DELETE",
        }
    }

    /// Accent color for rich delivery payloads.
    pub fn color(self) -> u32 {
        match self {
            Self::ChannelCreate | Self::RoleCreate | Self::MemberAdd | Self::BanRemove => {
                COLOR_CREATED
            }
            Self::ChannelUpdate
            | Self::RoleUpdate
            | Self::MemberUpdate
            | Self::MessageUpdate => COLOR_UPDATED,
            Self::ChannelDelete
            | Self::RoleDelete
            | Self::MemberRemove
            | Self::BanAdd
            | Self::MessageDelete => COLOR_REMOVED,
        }
    }

    /// All known event kinds, in table order.
    pub fn all() -> &'static [EventKind] {
        &[
            Self::ChannelCreate,
            Self::ChannelUpdate,
            Self::ChannelDelete,
            Self::RoleCreate,
            Self::RoleUpdate,
            Self::RoleDelete,
            Self::MemberAdd,
            Self::MemberUpdate,
            Self::MemberRemove,
            Self::BanAdd,
            Self::BanRemove,
            Self::MessageUpdate,
            Self::MessageDelete,
        ]
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = ParseEventKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseEventKindError(s.to_string()))
    }
}

/// Error returned when parsing an unknown event name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event kind: {0}")]
pub struct ParseEventKindError(pub String);
