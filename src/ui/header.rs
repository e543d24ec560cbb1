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

use crate::app::{App, Location};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HEADER_PAD: u16 = 2;

/// 2025-08-05T01:00:00+03:00, the moment the elapsed timer counts from.
pub const TIMER_ORIGIN_UNIX: i64 = 1_754_344_800;

/// Page shortcuts shown in the header: key label, page, dot color.
pub const PAGE_SHORTCUTS: [(&str, Location, Color); 4] = [
    ("F1", Location::Home, Color::Red),
    ("F2", Location::About, Color::Yellow),
    ("F3", Location::Docs, theme::EMERALD),
    ("F4", Location::Map, theme::SKY),
];

/// `Xw Xd Xh Xm Xs` for a non-negative number of seconds.
#[must_use]
pub fn format_elapsed(total_secs: u64) -> String {
    let minutes = total_secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let weeks = days / 7;
    format!("{weeks}w {}d {}h {}m {}s", days % 7, hours % 24, minutes % 60, total_secs % 60)
}

/// Seconds since the timer origin, zero while the origin is in the future.
#[must_use]
pub fn elapsed_since_origin(now_unix: i64) -> u64 {
    u64::try_from(now_unix - TIMER_ORIGIN_UNIX).unwrap_or(0)
}

fn page_label(location: &Location) -> &'static str {
    match location {
        Location::Home => "home",
        Location::About => "about",
        Location::Docs | Location::Document(_) => "docs",
        Location::Map => "map",
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + HEADER_PAD,
        y: area.y,
        width: area.width.saturating_sub(HEADER_PAD * 2),
        height: area.height,
    };

    let mut spans = Vec::with_capacity(PAGE_SHORTCUTS.len() * 3);
    for (key, page, color) in &PAGE_SHORTCUTS {
        let label_style = if app.location().is_at(page) {
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::DIM)
        };
        spans.push(Span::styled("\u{25CF} ", Style::default().fg(*color)));
        spans.push(Span::styled(format!("{key} {}", page_label(page)), label_style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), padded);

    let elapsed = elapsed_since_origin(chrono::Utc::now().timestamp());
    let timer = Line::from(vec![
        Span::styled("\u{23F1} ", Style::default().fg(theme::EMERALD)),
        Span::styled(format_elapsed(elapsed), Style::default().fg(theme::LINE_SYSTEM)),
    ]);
    frame.render_widget(Paragraph::new(timer).alignment(Alignment::Right), padded);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_every_unit() {
        assert_eq!(format_elapsed(0), "0w 0d 0h 0m 0s");
        assert_eq!(format_elapsed(59), "0w 0d 0h 0m 59s");
        assert_eq!(format_elapsed(3_661), "0w 0d 1h 1m 1s");
        let secs = 2 * 7 * 86_400 + 3 * 86_400 + 4 * 3_600 + 5 * 60 + 6;
        assert_eq!(format_elapsed(secs), "2w 3d 4h 5m 6s");
    }

    #[test]
    fn origin_in_future_is_zero() {
        assert_eq!(elapsed_since_origin(TIMER_ORIGIN_UNIX - 10), 0);
        assert_eq!(elapsed_since_origin(TIMER_ORIGIN_UNIX + 90), 90);
    }

    #[test]
    fn origin_matches_nairobi_time() {
        let origin = chrono::DateTime::parse_from_rfc3339("2025-08-05T01:00:00+03:00")
            .expect("valid timestamp");
        assert_eq!(origin.timestamp(), TIMER_ORIGIN_UNIX);
    }
}
