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

use crate::chat::model::{ChatMessage, MessageMetadata};
use serde::{Deserialize, Serialize};

/// Literal payload the endpoint sends after the last part.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Request body posted to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// One part of the UI message stream. Each SSE `data:` frame carries exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamPart {
    #[serde(rename_all = "camelCase")]
    Start {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_metadata: Option<MessageMetadata>,
    },
    TextStart {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    TextDelta {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        delta: String,
    },
    TextEnd {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    MessageMetadata { message_metadata: MessageMetadata },
    #[serde(rename_all = "camelCase")]
    Finish {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_metadata: Option<MessageMetadata>,
    },
    #[serde(rename_all = "camelCase")]
    Error { error_text: String },
    /// Step markers, reasoning, tool parts and anything newer than this client.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Part(StreamPart),
    Done,
}

/// Decode one SSE `data:` payload. Undecodable frames are skipped.
pub fn parse_frame(data: &str) -> Option<Frame> {
    let data = data.trim();
    if data.is_empty() {
        return None;
    }
    if data == DONE_SENTINEL {
        return Some(Frame::Done);
    }
    match serde_json::from_str::<StreamPart>(data) {
        Ok(part) => Some(Frame::Part(part)),
        Err(err) => {
            tracing::warn!(%err, "skipping undecodable chat stream frame");
            None
        }
    }
}
