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

use crate::chat::client::{ChatTransport, StreamRequest};
use crate::chat::events::{ChatEvent, TurnId};
use crate::chat::model::{ChatMessage, MessageMetadata, Millis, Role, SessionStatus};
use crate::chat::wire::StreamPart;
use std::rc::Rc;
use tokio_util::sync::CancellationToken;

struct ActiveTurn {
    turn: TurnId,
    cancel: CancellationToken,
    /// Index of the assistant message this turn streams into, once observed.
    assistant_idx: Option<usize>,
}

/// Owns the chat message list and the request/response lifecycle.
///
/// ```text
/// idle --send--> submitted --first delta--> streaming --finish--> idle
/// submitted|streaming --stop--> idle
/// submitted|streaming --failure--> error --send--> submitted
/// ```
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    status: SessionStatus,
    last_error: Option<String>,
    transport: Rc<dyn ChatTransport>,
    next_turn: u64,
    active: Option<ActiveTurn>,
}

impl ChatSession {
    #[must_use]
    pub fn new(transport: Rc<dyn ChatTransport>) -> Self {
        Self {
            messages: Vec::new(),
            status: SessionStatus::Idle,
            last_error: None,
            transport,
            next_turn: 1,
            active: None,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Message of the last failed turn, cleared by the next `send` or `reset`.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn active_turn(&self) -> Option<TurnId> {
        self.active.as_ref().map(|a| a.turn)
    }

    /// Append a user message and start streaming the reply.
    pub fn send(&mut self, text: &str, created_at: Millis) -> TurnId {
        // A send while a turn is in flight supersedes it; its partial text stays.
        self.cancel_active();

        let id = uuid::Uuid::new_v4().to_string();
        self.messages.push(ChatMessage::user(id, text, created_at));

        let turn = TurnId(self.next_turn);
        self.next_turn += 1;
        let cancel = CancellationToken::new();
        self.active = Some(ActiveTurn { turn, cancel: cancel.clone(), assistant_idx: None });
        self.status = SessionStatus::Submitted;
        self.last_error = None;

        tracing::info!(%turn, history = self.messages.len(), "chat turn submitted");
        self.transport.start(StreamRequest { turn, messages: self.messages.clone(), cancel });
        turn
    }

    /// Cancel the in-flight turn. Text already received is kept.
    pub fn stop(&mut self) {
        if !self.status.is_active() {
            return;
        }
        if let Some(turn) = self.active_turn() {
            tracing::info!(%turn, "chat turn stopped");
        }
        self.cancel_active();
        self.status = SessionStatus::Idle;
    }

    /// Drop every message and return to idle.
    pub fn reset(&mut self) {
        self.cancel_active();
        self.messages.clear();
        self.status = SessionStatus::Idle;
        self.last_error = None;
    }

    fn cancel_active(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
        }
    }

    /// Apply one stream event. Returns the id of an assistant message this event
    /// created, so the caller can record when it was first seen.
    pub fn apply(&mut self, event: ChatEvent) -> Option<String> {
        let Some(active_turn) = self.active_turn() else {
            tracing::debug!(turn = %event.turn(), "dropping chat event: no active turn");
            return None;
        };
        if event.turn() != active_turn {
            tracing::warn!(turn = %event.turn(), %active_turn, "dropping stale chat event");
            return None;
        }

        match event {
            ChatEvent::Part { part, .. } => self.apply_part(part),
            ChatEvent::Closed { .. } => {
                self.finish_turn();
                None
            }
            ChatEvent::Failed { message, .. } => {
                self.fail_turn(message);
                None
            }
        }
    }

    fn apply_part(&mut self, part: StreamPart) -> Option<String> {
        match part {
            StreamPart::Start { message_id, message_metadata } => {
                let (idx, created) = self.ensure_assistant(message_id);
                if let Some(metadata) = message_metadata {
                    self.messages[idx].merge_metadata(metadata);
                }
                created.then(|| self.messages[idx].id.clone())
            }
            StreamPart::TextStart { .. } => {
                let (idx, created) = self.ensure_assistant(None);
                self.messages[idx].start_text_part();
                created.then(|| self.messages[idx].id.clone())
            }
            StreamPart::TextDelta { delta, .. } => {
                let (idx, created) = self.ensure_assistant(None);
                self.messages[idx].push_text_delta(&delta);
                self.status = SessionStatus::Streaming;
                created.then(|| self.messages[idx].id.clone())
            }
            StreamPart::MessageMetadata { message_metadata } => {
                self.merge_assistant_metadata(message_metadata);
                None
            }
            StreamPart::Finish { message_metadata } => {
                if let Some(metadata) = message_metadata {
                    self.merge_assistant_metadata(metadata);
                }
                self.finish_turn();
                None
            }
            StreamPart::Error { error_text } => {
                self.fail_turn(error_text);
                None
            }
            StreamPart::TextEnd { .. } | StreamPart::Other => None,
        }
    }

    /// Index of this turn's assistant message, creating it on first sight.
    fn ensure_assistant(&mut self, message_id: Option<String>) -> (usize, bool) {
        if let Some(idx) = self.active.as_ref().and_then(|a| a.assistant_idx) {
            return (idx, false);
        }
        let id = message_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        self.messages.push(ChatMessage::assistant(id, None));
        let idx = self.messages.len() - 1;
        if let Some(active) = self.active.as_mut() {
            active.assistant_idx = Some(idx);
        }
        (idx, true)
    }

    fn merge_assistant_metadata(&mut self, metadata: MessageMetadata) {
        let Some(idx) = self.active.as_ref().and_then(|a| a.assistant_idx) else {
            return;
        };
        if let Some(msg) = self.messages.get_mut(idx)
            && msg.role == Role::Assistant
        {
            msg.merge_metadata(metadata);
        }
    }

    fn finish_turn(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::info!(turn = %active.turn, "chat turn complete");
        }
        self.status = SessionStatus::Idle;
    }

    fn fail_turn(&mut self, message: String) {
        if let Some(active) = self.active.take() {
            tracing::warn!(turn = %active.turn, "chat turn failed: {message}");
        }
        self.status = SessionStatus::Error;
        self.last_error = Some(message);
    }
}
