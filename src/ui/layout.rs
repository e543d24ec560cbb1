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

use crate::app::Location;
use ratatui::layout::{Constraint, Layout, Rect};

/// How much of the screen the terminal gets on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalMode {
    Full,
    /// Page content above, terminal in the bottom share.
    Overlay,
    Hidden,
}

impl TerminalMode {
    #[must_use]
    pub fn for_location(location: &Location) -> Self {
        match location {
            Location::Home => Self::Full,
            Location::Document(_) => Self::Hidden,
            Location::About | Location::Docs | Location::Map => Self::Overlay,
        }
    }
}

/// Percentage of the content area given to the terminal in overlay mode.
const OVERLAY_PERCENT: u16 = 40;
const OVERLAY_MIN_ROWS: u16 = 6;

pub struct TerminalLayout {
    pub transcript: Rect,
    pub autocomplete: Rect,
    pub input_sep: Rect,
    pub input: Rect,
    pub footer: Rect,
}

pub struct AppLayout {
    pub header: Rect,
    pub header_sep: Rect,
    /// Page content (zero-height in full terminal mode).
    pub page: Rect,
    pub terminal: Option<TerminalLayout>,
}

pub fn compute(area: Rect, mode: TerminalMode, input_rows: u16, autocomplete_rows: u16) -> AppLayout {
    let zero = Rect::new(area.x, area.y, area.width, 0);
    let show_header = area.height >= 8;
    let [header, header_sep, content] = Layout::vertical([
        Constraint::Length(u16::from(show_header)),
        Constraint::Length(u16::from(show_header)),
        Constraint::Min(0),
    ])
    .areas(area);

    let (page, terminal_area) = match mode {
        TerminalMode::Hidden => (content, None),
        TerminalMode::Full => (Rect::new(content.x, content.y, content.width, 0), Some(content)),
        TerminalMode::Overlay => {
            let rows = (content.height * OVERLAY_PERCENT / 100).max(OVERLAY_MIN_ROWS).min(content.height);
            let [page, term] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(rows)]).areas(content);
            (page, Some(term))
        }
    };

    AppLayout {
        header: if show_header { header } else { zero },
        header_sep: if show_header { header_sep } else { zero },
        page,
        terminal: terminal_area.map(|t| compute_terminal(t, input_rows, autocomplete_rows)),
    }
}

fn compute_terminal(area: Rect, input_rows: u16, autocomplete_rows: u16) -> TerminalLayout {
    let input_rows = input_rows.max(1);
    // Transcript keeps at least one row; the panel gives way first.
    let fixed = input_rows + 2;
    let autocomplete_rows = autocomplete_rows.min(area.height.saturating_sub(fixed + 1));
    let [transcript, autocomplete, input_sep, input, footer] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(autocomplete_rows),
        Constraint::Length(1),
        Constraint::Length(input_rows),
        Constraint::Length(1),
    ])
    .areas(area);
    TerminalLayout { transcript, autocomplete, input_sep, input, footer }
}
