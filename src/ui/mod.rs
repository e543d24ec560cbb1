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

mod about;
mod autocomplete;
mod docs;
mod header;
mod input;
pub mod layout;
mod map;
pub mod theme;
mod transcript;

pub use autocomplete::{NO_MATCH_TEXT, panel_lines};
pub use header::{PAGE_SHORTCUTS, format_elapsed};
pub use input::PLACEHOLDER;
pub use transcript::transcript_lines;

use crate::app::{App, FocusTarget, Location};
use crate::chat::SessionStatus;
use layout::{TerminalLayout, TerminalMode};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const FOOTER_PAD: u16 = 2;

pub fn render(frame: &mut Frame, app: &mut App) {
    let frame_area = frame.area();
    let mode = TerminalMode::for_location(app.location());
    let input_rows = input::visual_rows(app, frame_area.width);
    let autocomplete_rows = autocomplete::compute_height(app);
    let areas = layout::compute(frame_area, mode, input_rows, autocomplete_rows);

    if areas.header.height > 0 {
        header::render(frame, areas.header, app);
        render_separator(frame, areas.header_sep);
    }

    if areas.page.height > 0 {
        match app.location() {
            Location::About => about::render(frame, areas.page),
            Location::Docs => docs::render_list(frame, areas.page, app),
            Location::Document(_) => docs::render_detail(frame, areas.page, app),
            Location::Map => map::render(frame, areas.page, app),
            Location::Home => {}
        }
    }

    if let Some(term) = areas.terminal {
        render_terminal(frame, &term, app);
    }
}

fn render_terminal(frame: &mut Frame, areas: &TerminalLayout, app: &mut App) {
    transcript::render(frame, areas.transcript, app);
    autocomplete::render(frame, areas.autocomplete, app);
    render_separator(frame, areas.input_sep);
    input::render(frame, areas.input, app);
    render_footer(frame, areas.footer, app);
}

fn status_span(app: &App) -> Span<'static> {
    match app.terminal.session.status() {
        SessionStatus::Idle => Span::styled("ready", Style::default().fg(theme::DIM)),
        SessionStatus::Submitted => Span::styled("waiting", Style::default().fg(theme::SKY)),
        SessionStatus::Streaming => Span::styled("streaming", Style::default().fg(theme::SKY)),
        SessionStatus::Error => {
            let message = app.terminal.session.last_error().unwrap_or("request failed");
            Span::styled(format!("error: {message}"), Style::default().fg(theme::STATUS_ERROR))
        }
    }
}

fn footer_hint(app: &App) -> &'static str {
    if app.terminal.session.status().is_active() {
        "Esc stop  Ctrl+C quit"
    } else if app.focus == FocusTarget::Terminal && matches!(app.location(), Location::Docs) {
        "Tab documents  Ctrl+C quit"
    } else {
        "Enter send  Shift+Enter newline  Ctrl+C quit"
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };
    frame.render_widget(Paragraph::new(Line::from(status_span(app))), padded);
    let hint = Line::from(Span::styled(footer_hint(app), Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(hint).alignment(Alignment::Right), padded);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let sep_str = theme::SEPARATOR_CHAR.repeat(usize::from(area.width));
    let line = Line::from(Span::styled(sep_str, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line), area);
}
