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

use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

const BADGES: &[(&str, &str, Color)] = &[
    ("Backed by ", "Y Combinator", Color::Rgb(233, 111, 55)),
    ("Taught at ", "Penn", Color::Rgb(90, 130, 220)),
    ("Raised in ", "Philly", theme::TEXT),
    ("Made in ", "\u{1F30D}", theme::TEXT),
];

/// (name, pitch, url)
const STARTUPS: &[(&str, &str, &str)] = &[
    ("Affil.ai", "AI-powered financial affiliate network.", "https://affil.ai"),
    ("BLACKIVY", "Alumni club for brillant black minds.", "https://blkivy.club/"),
    (
        "Shipp",
        "Online dating sucks. Meet IRL.",
        "https://apps.apple.com/us/app/shipp-dating-app/id6445876197",
    ),
    ("Common Cents", "Personal finance education nonprofit.", "https://commoncents.org"),
];

fn about_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Vivek Olumbe",
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    for (lead, name, color) in BADGES {
        lines.push(Line::from(vec![
            Span::styled(*lead, Style::default().fg(theme::LINE_SYSTEM)),
            Span::styled(*name, Style::default().fg(*color).add_modifier(Modifier::BOLD)),
        ]));
    }
    lines.push(Line::default());
    for (name, pitch, url) in STARTUPS {
        lines.push(Line::from(vec![
            Span::styled(*name, Style::default().fg(theme::EMERALD).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" - {pitch} "), Style::default().fg(theme::TEXT)),
            Span::styled(*url, Style::default().fg(theme::DIM)),
        ]));
    }
    lines
}

pub fn render(frame: &mut Frame, area: Rect) {
    let paragraph =
        Paragraph::new(about_lines()).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
