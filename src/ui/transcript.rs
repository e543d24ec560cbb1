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

use crate::app::{ASSISTANT_LABEL, App, PROMPT_LABEL, TranscriptItem};
use crate::chat::{Role, now_millis};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

/// One styled row per transcript line; multi-line messages continue unlabelled.
#[must_use]
pub fn transcript_lines(items: &[TranscriptItem<'_>], spinner_frame: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for item in items {
        match item {
            TranscriptItem::Line(line) => {
                let style = Style::default().fg(theme::line_color(line.variant));
                lines.extend(
                    line.text.split('\n').map(|t| Line::from(Span::styled(t.to_owned(), style))),
                );
            }
            TranscriptItem::Chat { message, .. } => {
                let (label, color) = match message.role {
                    Role::User => (PROMPT_LABEL, theme::PROMPT_LABEL),
                    Role::Assistant => (ASSISTANT_LABEL, theme::ASSISTANT_LABEL),
                };
                let text = message.text();
                if text.is_empty() {
                    // Nothing streamed yet; the pending row covers it.
                    continue;
                }
                for (i, row) in text.split('\n').enumerate() {
                    let prefix = if i == 0 {
                        Span::styled(
                            format!("{label} "),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::raw(" ".repeat(label.len() + 1))
                    };
                    lines.push(Line::from(vec![
                        prefix,
                        Span::styled(row.to_owned(), Style::default().fg(theme::TEXT)),
                    ]));
                }
            }
            TranscriptItem::Pending { .. } => {
                let dots = theme::SPINNER_FRAMES[spinner_frame % theme::SPINNER_FRAMES.len()];
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{ASSISTANT_LABEL} "),
                        Style::default().fg(theme::ASSISTANT_LABEL).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(dots, Style::default().fg(theme::DIM)),
                ]));
            }
        }
    }
    lines
}

fn placeholder_lines() -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        "Type /help for commands, or just say hi.",
        Style::default().fg(theme::DIM),
    ))]
}

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let spinner_frame = app.spinner_frame;
    let items = app.terminal.items(now_millis());
    let mut lines = transcript_lines(&items, spinner_frame);
    if lines.is_empty() {
        lines = placeholder_lines();
    }

    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    let content_height = paragraph.line_count(area.width);
    let viewport_height = usize::from(area.height);

    app.scroll_max = content_height.saturating_sub(viewport_height);
    if app.auto_scroll {
        app.scroll_offset = app.scroll_max;
    }
    app.scroll_offset = app.scroll_offset.min(app.scroll_max);
    if app.scroll_offset >= app.scroll_max {
        app.auto_scroll = true;
    }

    let offset = u16::try_from(app.scroll_offset).unwrap_or(u16::MAX);
    frame.render_widget(paragraph.scroll((offset, 0)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{LineVariant, OutputLine};
    use crate::chat::ChatMessage;
    use pretty_assertions::assert_eq;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn labels_user_and_assistant_messages() {
        let user = ChatMessage::user("u", "hi", 1);
        let mut reply = ChatMessage::assistant("a", None);
        reply.push_text_delta("hello\nthere");
        let items = vec![
            TranscriptItem::Chat { message: &user, created_at: 1 },
            TranscriptItem::Chat { message: &reply, created_at: 2 },
        ];
        assert_eq!(
            plain(&transcript_lines(&items, 0)),
            vec!["guest@olumbe: hi", "vivek@olumbe: hello", "              there"]
        );
    }

    #[test]
    fn local_lines_render_verbatim() {
        let line = OutputLine {
            text: "  /help   - Show this help".to_owned(),
            variant: LineVariant::System,
            created_at: 0,
        };
        let items = vec![TranscriptItem::Line(&line)];
        assert_eq!(plain(&transcript_lines(&items, 0)), vec!["  /help   - Show this help"]);
    }

    #[test]
    fn pending_row_animates() {
        let items = vec![TranscriptItem::Pending { created_at: 0 }];
        let first = plain(&transcript_lines(&items, 0));
        let later = plain(&transcript_lines(&items, 2));
        assert!(first[0].starts_with("vivek@olumbe: "));
        assert_ne!(first, later);
    }

    #[test]
    fn empty_assistant_message_is_skipped() {
        let reply = ChatMessage::assistant("a", None);
        let items = vec![TranscriptItem::Chat { message: &reply, created_at: 0 }];
        assert!(transcript_lines(&items, 0).is_empty());
    }
}
