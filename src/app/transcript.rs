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

use crate::chat::{ChatMessage, Millis, Role, SessionStatus};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineVariant {
    System,
    User,
    Info,
}

/// A locally produced transcript line. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub variant: LineVariant,
    pub created_at: Millis,
}

/// Append-only list of local lines, in non-decreasing stamp order.
#[derive(Debug, Default)]
pub struct TranscriptLog {
    lines: Vec<OutputLine>,
}

impl TranscriptLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: impl Into<String>, variant: LineVariant) {
        self.append_at(text, variant, crate::chat::now_millis());
    }

    /// Append with an explicit stamp. A stamp older than the last line is raised
    /// to it so the log stays sorted even if the wall clock steps back.
    pub fn append_at(&mut self, text: impl Into<String>, variant: LineVariant, at: Millis) {
        let created_at = self.lines.last().map_or(at, |last| at.max(last.created_at));
        self.lines.push(OutputLine { text: text.into(), variant, created_at });
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// First time each message id was seen. Entries are assigned once.
#[derive(Debug, Default)]
pub struct MessageTimestamps {
    seen: HashMap<String, Millis>,
}

impl MessageTimestamps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `at` for `id` unless it already has a stamp.
    pub fn observe(&mut self, id: &str, at: Millis) -> Millis {
        *self.seen.entry(id.to_owned()).or_insert(at)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Millis> {
        self.seen.get(id).copied()
    }

    /// Creation time of a message: backend metadata first, then first-seen time.
    pub fn resolve(&mut self, message: &ChatMessage, now: Millis) -> Millis {
        message.created_at().unwrap_or_else(|| self.observe(&message.id, now))
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// One row of the merged, rendered transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptItem<'a> {
    Chat { message: &'a ChatMessage, created_at: Millis },
    Line(&'a OutputLine),
    /// Waiting for the first visible assistant text.
    Pending { created_at: Millis },
}

impl TranscriptItem<'_> {
    #[must_use]
    pub fn created_at(&self) -> Millis {
        match self {
            Self::Chat { created_at, .. } | Self::Pending { created_at } => *created_at,
            Self::Line(line) => line.created_at,
        }
    }
}

fn awaiting_reply(messages: &[ChatMessage], status: SessionStatus) -> bool {
    if !status.is_active() {
        return false;
    }
    !messages.last().is_some_and(|m| m.role == Role::Assistant && m.has_visible_text())
}

/// Interleave chat messages and local lines by creation time. Ties keep chat
/// messages ahead of lines, each in their own order.
pub fn merge<'a>(
    lines: &'a [OutputLine],
    messages: &'a [ChatMessage],
    status: SessionStatus,
    timestamps: &mut MessageTimestamps,
    now: Millis,
) -> Vec<TranscriptItem<'a>> {
    let mut items: Vec<TranscriptItem<'a>> = Vec::with_capacity(lines.len() + messages.len() + 1);
    items.extend(messages.iter().map(|message| TranscriptItem::Chat {
        message,
        created_at: timestamps.resolve(message, now),
    }));
    items.extend(lines.iter().map(TranscriptItem::Line));
    items.sort_by_key(|item| item.created_at());

    if awaiting_reply(messages, status) {
        items.push(TranscriptItem::Pending { created_at: now });
    }
    items
}
