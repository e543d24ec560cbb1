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

use crate::app::{App, FocusTarget, PROMPT_LABEL};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

pub const PLACEHOLDER: &str = "Start typing\u{2026} (try: /help, /clear)";

/// Columns taken by `guest@olumbe: ` before the draft text.
fn prompt_width() -> u16 {
    u16::try_from(PROMPT_LABEL.width() + 1).unwrap_or(u16::MAX)
}

/// Rows the prompt needs at this width.
#[must_use]
pub fn visual_rows(app: &App, area_width: u16) -> u16 {
    app.input.autosize(area_width.saturating_sub(prompt_width()))
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let label = Span::styled(format!("{PROMPT_LABEL} "), Style::default().fg(theme::PROMPT_LABEL));
    let focused = app.focus == FocusTarget::Terminal;

    if app.input.is_empty() {
        let line =
            Line::from(vec![label, Span::styled(PLACEHOLDER, Style::default().fg(theme::DIM))]);
        frame.render_widget(Paragraph::new(line), area);
        let x = area.x.saturating_add(prompt_width());
        if focused && x < area.right() && area.height > 0 {
            frame.set_cursor_position((x, area.y));
        }
        return;
    }

    let text_area = Rect {
        x: area.x + prompt_width(),
        width: area.width.saturating_sub(prompt_width()),
        ..area
    };
    frame.render_widget(Paragraph::new(Line::from(label)), area);

    // Draft wraps inside its own column so continuation rows line up.
    let lines: Vec<Line> = app
        .input
        .lines
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(theme::TEXT))))
        .collect();
    let content_width = usize::from(text_area.width);
    let cursor_visual_row = cursor_visual_row(app, content_width);
    let rows = usize::from(text_area.height);
    let scroll = cursor_visual_row.saturating_sub(rows.saturating_sub(1));
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, text_area);

    if !focused || content_width == 0 {
        return;
    }
    let col = app.input.lines[app.input.cursor_row]
        .chars()
        .take(app.input.cursor_col)
        .collect::<String>()
        .width();
    let x = text_area.x + u16::try_from(col % content_width).unwrap_or(0);
    let y = text_area.y + u16::try_from(cursor_visual_row - scroll).unwrap_or(0);
    if x < text_area.right() && y < text_area.bottom() {
        frame.set_cursor_position((x, y));
    }
}

/// Visual row of the cursor inside the wrapped draft.
fn cursor_visual_row(app: &App, content_width: usize) -> usize {
    if content_width == 0 {
        return 0;
    }
    let before: usize = app.input.lines[..app.input.cursor_row]
        .iter()
        .map(|l| l.width().max(1).div_ceil(content_width))
        .sum();
    let col = app.input.lines[app.input.cursor_row]
        .chars()
        .take(app.input.cursor_col)
        .collect::<String>()
        .width();
    before + col / content_width
}
