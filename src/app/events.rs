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

use super::keys::dispatch_key_by_focus;
use super::state::{App, FocusTarget};
use crossterm::event::{Event, KeyEventKind, MouseEvent, MouseEventKind};

const MOUSE_SCROLL_LINES: usize = 3;

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => dispatch_key_by_focus(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Paste(text) => match app.focus {
            FocusTarget::Terminal => app.input.insert_str(&text),
            FocusTarget::DocumentTitle => {
                if let Some(detail) = app.detail.as_mut() {
                    // Titles are single-line.
                    detail.title.insert_str(&text.replace(['\r', '\n'], " "));
                }
            }
            FocusTarget::DocsList => {}
        },
        // Resize is handled automatically by ratatui
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(MOUSE_SCROLL_LINES),
        MouseEventKind::ScrollDown => app.scroll_down(MOUSE_SCROLL_LINES),
        _ => {}
    }
}
