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

use super::input::{EnterIntent, enter_intent};
use super::navigation::Location;
use super::state::{App, FocusTarget};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const SCROLL_ROWS: usize = 3;
const PAGE_SCROLL_ROWS: usize = 10;

fn is_ctrl_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

fn is_ctrl_char_shortcut(key: KeyEvent, expected: char) -> bool {
    is_ctrl_shortcut(key.modifiers)
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&expected))
}

/// Shortcuts that work whatever has focus.
fn handle_global_shortcuts(app: &mut App, key: KeyEvent) -> bool {
    if is_ctrl_char_shortcut(key, 'c') {
        app.stop_stream();
        app.should_quit = true;
        return true;
    }
    if is_ctrl_char_shortcut(key, 'l') {
        app.force_redraw = true;
        return true;
    }
    if let KeyCode::F(n) = key.code
        && let Some((_, page, _)) = crate::ui::PAGE_SHORTCUTS.get(usize::from(n).wrapping_sub(1))
    {
        app.go_to(page.clone());
        return true;
    }
    false
}

pub fn dispatch_key_by_focus(app: &mut App, key: KeyEvent) {
    if handle_global_shortcuts(app, key) {
        return;
    }
    match app.focus {
        FocusTarget::Terminal => handle_terminal_key(app, key),
        FocusTarget::DocsList => handle_docs_list_key(app, key),
        FocusTarget::DocumentTitle => handle_document_title_key(app, key),
    }
}

fn handle_terminal_key(app: &mut App, key: KeyEvent) {
    if let Some(intent) = enter_intent(&key) {
        match intent {
            EnterIntent::Submit => {
                app.submit_input();
            }
            EnterIntent::Newline => app.input.insert_newline(),
        }
        return;
    }

    let ctrl = is_ctrl_shortcut(key.modifiers);
    match key.code {
        KeyCode::Esc => {
            if app.terminal.session.status().is_active() {
                app.stop_stream();
            } else {
                app.input.clear();
            }
        }
        KeyCode::Tab => {
            if !app.complete_command() && matches!(app.location(), Location::Docs) {
                app.focus = FocusTarget::DocsList;
            }
        }
        KeyCode::Up if ctrl => app.scroll_up(SCROLL_ROWS),
        KeyCode::Down if ctrl => app.scroll_down(SCROLL_ROWS),
        KeyCode::PageUp => app.scroll_up(PAGE_SCROLL_ROWS),
        KeyCode::PageDown => app.scroll_down(PAGE_SCROLL_ROWS),
        KeyCode::Up => app.input.move_up(),
        KeyCode::Down => app.input.move_down(),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Home => app.input.move_home(),
        KeyCode::End => app.input.move_end(),
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Delete => app.input.delete(),
        KeyCode::Char(c) if !ctrl => app.input.insert_char(c),
        _ => {}
    }
}

fn handle_docs_list_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char_shortcut(key, 'n') {
        app.create_document();
        return;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Tab => app.focus = FocusTarget::Terminal,
        KeyCode::Up => app.docs.select_prev(),
        KeyCode::Down => app.docs.select_next(),
        KeyCode::PageDown => app.docs.next_page(app.documents.as_ref()),
        KeyCode::PageUp => app.docs.prev_page(app.documents.as_ref()),
        KeyCode::Enter => app.open_selected_document(),
        KeyCode::Delete => app.remove_selected_document(),
        KeyCode::Backspace => app.docs.pop_search_char(app.documents.as_ref()),
        KeyCode::Char(c) if !is_ctrl_shortcut(key.modifiers) => {
            app.docs.push_search_char(c, app.documents.as_ref());
        }
        _ => {}
    }
}

fn handle_document_title_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.go_back();
        return;
    }
    if key.code == KeyCode::Enter {
        app.rename_open_document();
        return;
    }
    let Some(detail) = app.detail.as_mut() else {
        return;
    };
    let title = &mut detail.title;
    match key.code {
        KeyCode::Left => title.move_left(),
        KeyCode::Right => title.move_right(),
        KeyCode::Home => title.move_home(),
        KeyCode::End => title.move_end(),
        KeyCode::Backspace => title.backspace(),
        KeyCode::Delete => title.delete(),
        KeyCode::Char(c) if !is_ctrl_shortcut(key.modifiers) => title.insert_char(c),
        _ => {}
    }
}
