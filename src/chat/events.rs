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

use crate::chat::wire::StreamPart;
use std::fmt;

/// Identifies one request/response stream. Events from any other turn than the
/// session's active one are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(pub u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn-{}", self.0)
    }
}

/// Messages sent from a stream task to the App/UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// A decoded part of the response stream, in arrival order.
    Part { turn: TurnId, part: StreamPart },
    /// The server closed the stream (EOF or `[DONE]`).
    Closed { turn: TurnId },
    /// Transport failure or an `error` part.
    Failed { turn: TurnId, message: String },
}

impl ChatEvent {
    #[must_use]
    pub fn turn(&self) -> TurnId {
        match self {
            Self::Part { turn, .. } | Self::Closed { turn } | Self::Failed { turn, .. } => *turn,
        }
    }
}
