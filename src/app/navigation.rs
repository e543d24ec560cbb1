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

use crate::docs::DocumentId;
use std::fmt;

/// A page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Location {
    #[default]
    Home,
    About,
    Docs,
    Document(DocumentId),
    Map,
}

impl Location {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::About => "/about".to_owned(),
            Self::Docs => "/docs".to_owned(),
            Self::Document(id) => format!("/docs/{id}"),
            Self::Map => "/map".to_owned(),
        }
    }

    /// Whether this location already satisfies a navigation to `dest`.
    /// Any document page counts as being "at" the docs section.
    #[must_use]
    pub fn is_at(&self, dest: &Self) -> bool {
        match (self, dest) {
            (Self::Docs | Self::Document(_), Self::Docs) => true,
            _ => self == dest,
        }
    }

    /// Pages that render the terminal below their own content.
    #[must_use]
    pub fn shows_terminal_overlay(&self) -> bool {
        matches!(self, Self::About | Self::Docs | Self::Map)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Side-effecting page switch. The dispatcher does not observe a result.
pub trait Navigator {
    fn current(&self) -> &Location;
    fn navigate(&mut self, to: Location);
}

/// In-process navigator: the current page plus a back stack.
#[derive(Debug, Default)]
pub struct Router {
    current: Location,
    history: Vec<Location>,
}

impl Router {
    #[must_use]
    pub fn new(start: Location) -> Self {
        Self { current: start, history: Vec::new() }
    }

    /// Return to the previous page. Returns false when there is none.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(prev) => {
                tracing::info!(from = %self.current, to = %prev, "navigate back");
                self.current = prev;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn history(&self) -> &[Location] {
        &self.history
    }
}

impl Navigator for Router {
    fn current(&self) -> &Location {
        &self.current
    }

    fn navigate(&mut self, to: Location) {
        if self.current == to {
            return;
        }
        tracing::info!(from = %self.current, to = %to, "navigate");
        let prev = std::mem::replace(&mut self.current, to);
        self.history.push(prev);
    }
}
