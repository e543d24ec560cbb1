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

use super::commands::{self, CommandAction, SIGIL};
use super::navigation::{Location, Navigator};
use super::transcript::{LineVariant, MessageTimestamps, TranscriptItem, TranscriptLog};
use crate::chat::{ChatSession, ChatTransport, Millis, TurnId, now_millis};
use std::rc::Rc;

pub const PROMPT_LABEL: &str = "guest@olumbe:";
pub const ASSISTANT_LABEL: &str = "vivek@olumbe:";

/// What a submitted line did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input.
    Ignored,
    Sent(TurnId),
    Cleared,
    Help,
    Navigated(Location),
    Unknown,
}

/// Everything the terminal owns: local lines, the chat session and the
/// first-seen table. These three are only ever cleared together.
pub struct TerminalState {
    pub transcript: TranscriptLog,
    pub timestamps: MessageTimestamps,
    pub session: ChatSession,
}

impl TerminalState {
    #[must_use]
    pub fn new(transport: Rc<dyn ChatTransport>) -> Self {
        Self {
            transcript: TranscriptLog::new(),
            timestamps: MessageTimestamps::new(),
            session: ChatSession::new(transport),
        }
    }

    /// Empty the transcript, the chat history and the timestamp table, cancelling
    /// any in-flight stream.
    pub fn coordinated_clear(&mut self) {
        self.session.reset();
        self.transcript.clear();
        self.timestamps.clear();
    }

    /// Merged view for rendering.
    pub fn items(&mut self, now: Millis) -> Vec<TranscriptItem<'_>> {
        super::transcript::merge(
            self.transcript.lines(),
            self.session.messages(),
            self.session.status(),
            &mut self.timestamps,
            now,
        )
    }

    /// Handle one submitted line: chat text goes to the session, `/` commands run
    /// locally after being echoed.
    pub fn handle<N: Navigator>(&mut self, navigator: &mut N, raw: &str) -> Outcome {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Outcome::Ignored;
        }
        let now = now_millis();

        let Some(name) = trimmed.strip_prefix(SIGIL) else {
            return Outcome::Sent(self.session.send(trimmed, now));
        };

        self.transcript.append_at(format!("{PROMPT_LABEL} {trimmed}"), LineVariant::User, now);

        let name = name.to_lowercase();
        let available = commands::available_commands(navigator.current());
        let Some(command) = commands::resolve(&name, &available) else {
            tracing::debug!(command = trimmed, "unknown command");
            self.transcript
                .append(format!("Unknown command: {trimmed}. Type /help."), LineVariant::System);
            return Outcome::Unknown;
        };

        match command.action.clone() {
            CommandAction::Clear => {
                self.coordinated_clear();
                Outcome::Cleared
            }
            CommandAction::Help => {
                self.transcript.append("Available commands:", LineVariant::Info);
                for cmd in &available {
                    self.transcript.append(
                        format!("  {:<7} - {}", cmd.name, cmd.description),
                        LineVariant::System,
                    );
                }
                Outcome::Help
            }
            CommandAction::Navigate(dest) => {
                navigator.navigate(dest.clone());
                self.coordinated_clear();
                Outcome::Navigated(dest)
            }
        }
    }
}
