//! Payload variants and the length-banded selection function.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vigil_render::AuditMessage;

/// Longest body (in code points) delivered as plain text.
pub const PLAIN_TEXT_MAX_CHARS: usize = 2000;

/// Longest body (in code points) delivered as a rich block.
pub const RICH_BLOCK_MAX_CHARS: usize = 4096;

/// The shaped payload handed to the send primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeliveryPayload {
    /// A bare text message.
    PlainText {
        /// The message content.
        content: String,
    },
    /// A rich embedded block.
    RichBlock {
        /// Block title; the event name.
        title: String,
        /// Block body.
        body: String,
        /// Accent color.
        color: u32,
        /// Footer text.
        footer: String,
        /// When the block was shaped.
        timestamp: DateTime<Utc>,
    },
    /// A file attachment for bodies too large to embed.
    FileAttachment {
        /// Attachment filename, `<EVENT_NAME>.txt`.
        filename: String,
        /// File content.
        content: String,
    },
}

impl DeliveryPayload {
    /// The variant of this payload.
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::PlainText { .. } => PayloadKind::PlainText,
            Self::RichBlock { .. } => PayloadKind::RichBlock,
            Self::FileAttachment { .. } => PayloadKind::FileAttachment,
        }
    }
}

/// Discriminant of [`DeliveryPayload`], reported in delivery outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Inline text.
    PlainText,
    /// Rich embedded block.
    RichBlock,
    /// File attachment.
    FileAttachment,
}

impl PayloadKind {
    /// Stable label for logs and API responses.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlainText => "plain_text",
            Self::RichBlock => "rich_block",
            Self::FileAttachment => "file_attachment",
        }
    }
}

/// Selects and shapes the payload for a rendered message.
///
/// Selection is a total, deterministic function of the body length,
/// measured in Unicode code points:
/// `0..=2000` plain text, `2001..=4096` rich block, `4097..` file.
pub fn shape(message: &AuditMessage, color: u32, footer: &str) -> DeliveryPayload {
    let chars = message.body.chars().count();
    if chars <= PLAIN_TEXT_MAX_CHARS {
        DeliveryPayload::PlainText {
            content: message.body.clone(),
        }
    } else if chars <= RICH_BLOCK_MAX_CHARS {
        DeliveryPayload::RichBlock {
            title: message.event_name.clone(),
            body: message.body.clone(),
            color,
            footer: footer.to_string(),
            timestamp: Utc::now(),
        }
    } else {
        DeliveryPayload::FileAttachment {
            filename: format!("{}.txt", message.event_name),
            content: message.body.clone(),
        }
    }
}
