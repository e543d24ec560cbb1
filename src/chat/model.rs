// olumbe-terminal - The olumbe portfolio as a terminal app
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock time in milliseconds since the Unix epoch.
pub type Millis = u64;

#[must_use]
pub fn now_millis() -> Millis {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One content fragment of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MessagePart {
    Text { text: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Millis>,
}

impl MessageMetadata {
    #[must_use]
    pub fn created_at(created_at: Millis) -> Self {
        Self { created_at: Some(created_at) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub parts: Vec<MessagePart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(id: impl Into<String>, text: impl Into<String>, created_at: Millis) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            parts: vec![MessagePart::Text { text: text.into() }],
            metadata: Some(MessageMetadata::created_at(created_at)),
        }
    }

    #[must_use]
    pub fn assistant(id: impl Into<String>, metadata: Option<MessageMetadata>) -> Self {
        Self { id: id.into(), role: Role::Assistant, parts: Vec::new(), metadata }
    }

    /// Creation time reported by the backend (or stamped locally for user messages).
    #[must_use]
    pub fn created_at(&self) -> Option<Millis> {
        self.metadata.and_then(|m| m.created_at)
    }

    /// Record backend metadata. A creation time, once known, is never revised.
    pub fn merge_metadata(&mut self, incoming: MessageMetadata) {
        match self.metadata.as_mut() {
            Some(existing) => {
                if existing.created_at.is_none() {
                    existing.created_at = incoming.created_at;
                }
            }
            None => self.metadata = Some(incoming),
        }
    }

    /// Concatenated text of all text parts.
    #[must_use]
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                MessagePart::Text { text } => text.as_str(),
            })
            .collect()
    }

    #[must_use]
    pub fn has_visible_text(&self) -> bool {
        self.parts.iter().any(|part| match part {
            MessagePart::Text { text } => !text.is_empty(),
        })
    }

    pub fn start_text_part(&mut self) {
        self.parts.push(MessagePart::Text { text: String::new() });
    }

    /// Append a streamed delta to the trailing text part, opening one if needed.
    pub fn push_text_delta(&mut self, delta: &str) {
        if let Some(MessagePart::Text { text }) = self.parts.last_mut() {
            text.push_str(delta);
        } else {
            self.parts.push(MessagePart::Text { text: delta.to_owned() });
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Submitted,
    Streaming,
    Error,
}

impl SessionStatus {
    /// A request is in flight (waiting for the first delta or streaming).
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Submitted | Self::Streaming)
    }
}
