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

use crate::app::App;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution, Points};

/// Canvas coordinates (longitude, latitude) of every row.
#[must_use]
pub fn plot_points(app: &App) -> Vec<(f64, f64)> {
    app.locations.iter().map(|row| (row.longitude, row.latitude)).collect()
}

fn summary_line(app: &App) -> Line<'static> {
    if let Some(err) = &app.location_error {
        return Line::from(Span::styled(err.clone(), Style::default().fg(theme::STATUS_ERROR)));
    }
    let mut spans = vec![Span::styled(
        format!("{} points", app.locations.len()),
        Style::default().fg(theme::TEXT),
    )];
    if let Some(latest) = app.locations.first() {
        spans.push(Span::styled(
            format!(
                "  latest {:.4}, {:.4} at {}",
                latest.latitude,
                latest.longitude,
                latest.timestamp.format("%Y-%m-%d %H:%M UTC")
            ),
            Style::default().fg(theme::DIM),
        ));
    }
    Line::from(spans)
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let [summary, canvas_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    frame.render_widget(Paragraph::new(summary_line(app)), summary);

    let coords = plot_points(app);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(|ctx| {
            ctx.draw(&Map { resolution: MapResolution::High, color: theme::DIM });
            ctx.layer();
            ctx.draw(&Points { coords: &coords, color: theme::MAP_POINT });
        });
    frame.render_widget(canvas, canvas_area);
}
