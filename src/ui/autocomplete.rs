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

use crate::app::{App, Command, CommandMatches, available_commands};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub const NO_MATCH_TEXT: &str = "No matching commands";

/// Rows shown in the command panel for the current draft. Empty when the
/// draft is not a command.
#[must_use]
pub fn panel_lines(matches: &CommandMatches, available: &[Command]) -> Vec<Line<'static>> {
    let (commands, no_match) = match matches {
        CommandMatches::Inactive => return Vec::new(),
        CommandMatches::All(cmds) => (cmds.as_slice(), false),
        CommandMatches::Filtered(cmds) if cmds.is_empty() => (available, true),
        CommandMatches::Filtered(cmds) => (cmds.as_slice(), false),
    };

    let mut lines: Vec<Line<'static>> = commands
        .iter()
        .enumerate()
        .map(|(i, cmd)| {
            // Tab completes the first candidate.
            let marker = if i == 0 && !no_match { " \u{25b8} " } else { "   " };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme::EMERALD)),
                Span::styled(
                    cmd.name,
                    Style::default().fg(theme::EMERALD).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" - {}", cmd.description),
                    Style::default().fg(theme::LINE_SYSTEM),
                ),
            ])
        })
        .collect();
    if no_match {
        lines.push(Line::from(Span::styled(
            format!("   {NO_MATCH_TEXT}"),
            Style::default().fg(theme::LINE_SYSTEM),
        )));
    }
    lines
}

/// Panel height including borders, zero when hidden.
#[must_use]
pub fn compute_height(app: &App) -> u16 {
    let available = available_commands(app.location());
    let rows = panel_lines(&app.command_matches(), &available).len();
    if rows == 0 { 0 } else { u16::try_from(rows + 2).unwrap_or(u16::MAX) }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let available = available_commands(app.location());
    let lines = panel_lines(&app.command_matches(), &available);
    if lines.is_empty() {
        return;
    }
    let block = Block::default()
        .title(Span::styled(" Available commands ", Style::default().fg(theme::DIM)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::DIM));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
