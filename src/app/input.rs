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

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// Tallest the prompt grows before it starts scrolling internally.
pub const MAX_INPUT_ROWS: u16 = 8;

/// What the Enter key means for the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterIntent {
    Submit,
    Newline,
}

/// Enter submits; Shift+Enter and Alt+Enter break the line.
#[must_use]
pub fn enter_intent(key: &KeyEvent) -> Option<EnterIntent> {
    if key.code != KeyCode::Enter {
        return None;
    }
    if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) {
        Some(EnterIntent::Newline)
    } else {
        Some(EnterIntent::Submit)
    }
}

/// The prompt's draft buffer: lines plus a char-indexed cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub lines: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self { lines: vec![String::new()], cursor_row: 0, cursor_col: 0 }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }

    /// Replace the whole draft and put the cursor at its end.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_owned).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_row = self.lines.len() - 1;
        self.cursor_col = self.lines[self.cursor_row].chars().count();
    }

    /// Take the draft for submission, leaving the prompt empty.
    pub fn take_text(&mut self) -> String {
        let text = self.text();
        self.clear();
        text
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.cursor_row];
        let at = byte_index(line, self.cursor_col);
        line.insert(at, c);
        self.cursor_col += 1;
    }

    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor_row];
        let at = byte_index(line, self.cursor_col);
        let tail = line.split_off(at);
        self.cursor_row += 1;
        self.lines.insert(self.cursor_row, tail);
        self.cursor_col = 0;
    }

    /// Insert pasted text, normalizing CRLF and lone CR to newlines.
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        for c in normalized.chars() {
            if c == '\n' { self.insert_newline() } else { self.insert_char(c) }
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            let line = &mut self.lines[self.cursor_row];
            let at = byte_index(line, self.cursor_col);
            line.remove(at);
        } else if self.cursor_row > 0 {
            let joined = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.lines[self.cursor_row].chars().count();
            self.lines[self.cursor_row].push_str(&joined);
        }
    }

    pub fn delete(&mut self) {
        let len = self.lines[self.cursor_row].chars().count();
        if self.cursor_col < len {
            let line = &mut self.lines[self.cursor_row];
            let at = byte_index(line, self.cursor_col);
            line.remove(at);
        } else if self.cursor_row + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.lines[self.cursor_row].chars().count();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_col < self.lines[self.cursor_row].chars().count() {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.cursor_col.min(self.lines[self.cursor_row].chars().count());
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = self.cursor_col.min(self.lines[self.cursor_row].chars().count());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_col = self.lines[self.cursor_row].chars().count();
    }

    /// Rows the draft occupies when wrapped at `width` columns.
    #[must_use]
    pub fn visual_rows(&self, width: u16) -> u16 {
        let width = usize::from(width.max(1));
        let rows: usize = self.lines.iter().map(|line| line.width().max(1).div_ceil(width)).sum();
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    /// Prompt height for this draft, recomputed on every render.
    #[must_use]
    pub fn autosize(&self, width: u16) -> u16 {
        self.visual_rows(width).clamp(1, MAX_INPUT_ROWS)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}
