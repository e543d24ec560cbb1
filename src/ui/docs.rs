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

use crate::app::{App, FocusTarget};
use crate::docs::PAGE_SIZE;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap};

fn border_style(focused: bool) -> Style {
    Style::default().fg(if focused { theme::EMERALD } else { theme::DIM })
}

pub fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == FocusTarget::DocsList;
    let [search_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let search = Line::from(vec![
        Span::styled("search: ", Style::default().fg(theme::DIM)),
        Span::styled(app.docs.search.clone(), Style::default().fg(theme::TEXT)),
    ]);
    frame.render_widget(Paragraph::new(search), search_area);

    let items: Vec<ListItem> = if app.docs.page.items.is_empty() {
        vec![ListItem::new(Span::styled("No documents", Style::default().fg(theme::DIM)))]
    } else {
        app.docs.page.items.iter().map(|d| ListItem::new(d.title.clone())).collect()
    };
    let mut state = ListState::default();
    if focused && !app.docs.page.items.is_empty() {
        state.select(Some(app.docs.selected));
    }
    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(" Documents ", Style::default().fg(theme::DIM)))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style(focused)),
        )
        .style(Style::default().fg(theme::TEXT))
        .highlight_style(Style::default().fg(theme::EMERALD).add_modifier(Modifier::BOLD))
        .highlight_symbol("\u{25b8} ");
    frame.render_stateful_widget(list, list_area, &mut state);

    frame.render_widget(Paragraph::new(status_line(app, focused)), status_area);
}

fn status_line(app: &App, focused: bool) -> Line<'static> {
    if let Some(status) = &app.docs.status {
        return Line::from(Span::styled(status.clone(), Style::default().fg(theme::LINE_INFO)));
    }
    let hint = if focused {
        "Enter open  Ctrl+N new  Del delete  PgUp/PgDn page  Tab terminal"
    } else {
        "Tab to browse documents"
    };
    let mut spans = vec![Span::styled(hint, Style::default().fg(theme::DIM))];
    if app.docs.page.next_cursor.is_some() || app.docs.has_prev_page() {
        spans.push(Span::styled(
            format!("  ({PAGE_SIZE} per page)"),
            Style::default().fg(theme::DIM),
        ));
    }
    Line::from(spans)
}

pub fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(detail) = app.detail.as_ref() else {
        return;
    };
    let [title_area, meta_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let title_block = Block::default()
        .title(Span::styled(" Title ", Style::default().fg(theme::DIM)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(true));
    let inner = title_block.inner(title_area);
    frame.render_widget(
        Paragraph::new(detail.title.text())
            .style(Style::default().fg(theme::TEXT))
            .block(title_block),
        title_area,
    );
    let cursor_x = inner.x + u16::try_from(detail.title.cursor_col).unwrap_or(0);
    if cursor_x < inner.right() {
        frame.set_cursor_position((cursor_x, inner.y));
    }

    match &detail.document {
        Ok(doc) => {
            let created = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(
                i64::try_from(doc.created_at).unwrap_or(i64::MAX),
            )
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_default();
            let meta = Line::from(Span::styled(
                format!("by {}  created {created}", doc.owner_id),
                Style::default().fg(theme::DIM),
            ));
            frame.render_widget(Paragraph::new(meta), meta_area);

            let body: Vec<Line> = if doc.content.is_empty() {
                vec![Line::from(Span::styled("(empty)", Style::default().fg(theme::DIM)))]
            } else {
                doc.content.iter().map(|p| Line::from(p.clone())).collect()
            };
            frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), body_area);
        }
        Err(err) => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    err.to_string(),
                    Style::default().fg(theme::STATUS_ERROR),
                )),
                meta_area,
            );
        }
    }

    let status = detail.status.clone().unwrap_or_else(|| "Enter save title  Esc back".to_owned());
    frame.render_widget(
        Paragraph::new(Span::styled(status, Style::default().fg(theme::DIM))),
        status_area,
    );
}
