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

pub mod commands;
pub mod dispatch;
mod docs_view;
mod events;
pub mod input;
mod keys;
pub mod navigation;
mod state;
pub mod transcript;

pub use commands::{Command, CommandAction, CommandMatches, available_commands, match_commands};
pub use dispatch::{ASSISTANT_LABEL, Outcome, PROMPT_LABEL, TerminalState};
pub use docs_view::{DocsView, DocumentDetail};
pub use events::handle_terminal_event;
pub use input::InputState;
pub use navigation::{Location, Navigator, Router};
pub use state::{App, FocusTarget, create_app};
pub use transcript::{LineVariant, OutputLine, TranscriptItem};

use crate::error::AppError;
use crossterm::event::{
    EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use futures::{FutureExt as _, StreamExt};
use std::time::{Duration, Instant};

/// Without these most terminals report Shift+Enter as a bare Enter.
/// `REPORT_EVENT_TYPES` also brings release events, which the key handler drops.
pub(crate) const KEYBOARD_ENHANCEMENT: KeyboardEnhancementFlags =
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        .union(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        .union(KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS);

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal =
        ratatui::try_init().map_err(|e| anyhow::Error::new(AppError::TerminalUnavailable).context(e))?;

    // Bracketed paste, mouse wheel and the enhanced keyboard protocol for
    // Shift+Enter (ignore error on unsupported terminals)
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::EnableBracketedPaste,
        crossterm::event::EnableMouseCapture,
        PushKeyboardEnhancementFlags(KEYBOARD_ENHANCEMENT),
    );

    let mut events = EventStream::new();
    let tick_duration = Duration::from_millis(16);
    let mut last_render = Instant::now();
    let result = loop {
        // Phase 1: wait for at least one event or the next frame tick
        let time_to_next = tick_duration.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                events::handle_terminal_event(app, event);
            }
            Some(event) = app.event_rx.recv() => {
                app.handle_chat_event(event);
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // Phase 2: drain all remaining queued events (non-blocking)
        loop {
            // Terminal events first (keeps typing responsive)
            if let Some(Some(Ok(event))) = events.next().now_or_never() {
                events::handle_terminal_event(app, event);
                continue;
            }
            match app.event_rx.try_recv() {
                Ok(event) => app.handle_chat_event(event),
                Err(_) => break,
            }
        }

        if app.should_quit {
            break Ok(());
        }

        // Phase 3: render once
        if app.terminal.session.status().is_active() {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
        }
        if app.force_redraw {
            if let Err(e) = terminal.clear() {
                break Err(anyhow::Error::new(e));
            }
            app.force_redraw = false;
        }
        if let Err(e) = terminal.draw(|f| crate::ui::render(f, app)) {
            break Err(anyhow::Error::new(e));
        }
        last_render = Instant::now();
    };

    // Cancel any in-flight stream before tearing down
    app.stop_stream();

    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableBracketedPaste,
        crossterm::event::DisableMouseCapture,
        PopKeyboardEnhancementFlags,
    );
    ratatui::restore();

    result
}
