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

pub mod client;
pub mod endpoint;
pub mod events;
pub mod model;
pub mod session;
pub mod wire;

pub use client::{ChatTransport, HttpChatClient, RecordingTransport, StreamRequest};
pub use events::{ChatEvent, TurnId};
pub use model::{ChatMessage, MessageMetadata, MessagePart, Millis, Role, SessionStatus, now_millis};
pub use session::ChatSession;
