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

use super::navigation::Location;

pub const SIGIL: char = '/';

/// What a command does when dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    Help,
    Clear,
    Navigate(Location),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub action: CommandAction,
}

impl Command {
    const fn new(name: &'static str, description: &'static str, action: CommandAction) -> Self {
        Self { name, description, action }
    }

    /// Name without the leading sigil.
    #[must_use]
    pub fn bare_name(&self) -> &'static str {
        self.name.strip_prefix(SIGIL).unwrap_or(self.name)
    }
}

fn builtins() -> [Command; 2] {
    [
        Command::new("/help", "Show this help", CommandAction::Help),
        Command::new("/clear", "Clear the terminal", CommandAction::Clear),
    ]
}

fn navigation_commands() -> [Command; 4] {
    [
        Command::new("/docs", "Go to docs", CommandAction::Navigate(Location::Docs)),
        Command::new("/about", "Go to about page", CommandAction::Navigate(Location::About)),
        Command::new("/home", "Go home", CommandAction::Navigate(Location::Home)),
        Command::new("/map", "Go to map", CommandAction::Navigate(Location::Map)),
    ]
}

/// Commands usable from `location`: built-ins first, then every navigation
/// command whose destination is not the current page.
#[must_use]
pub fn available_commands(location: &Location) -> Vec<Command> {
    let nav = navigation_commands().into_iter().filter(|cmd| match &cmd.action {
        CommandAction::Navigate(dest) => !location.is_at(dest),
        _ => true,
    });
    builtins().into_iter().chain(nav).collect()
}

/// Result of matching a draft against the available commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandMatches {
    /// Draft is not a command; no panel.
    Inactive,
    /// Draft is exactly the sigil.
    All(Vec<Command>),
    /// Prefix matches in registry order. Empty means "no matching commands".
    Filtered(Vec<Command>),
}

impl CommandMatches {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Inactive)
    }

    #[must_use]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::Filtered(found) if found.is_empty())
    }

    #[must_use]
    pub fn commands(&self) -> &[Command] {
        match self {
            Self::Inactive => &[],
            Self::All(cmds) | Self::Filtered(cmds) => cmds,
        }
    }
}

#[must_use]
pub fn match_commands(input: &str, available: &[Command]) -> CommandMatches {
    let trimmed = input.trim();
    let Some(query) = trimmed.strip_prefix(SIGIL) else {
        return CommandMatches::Inactive;
    };
    if query.is_empty() {
        return CommandMatches::All(available.to_vec());
    }
    let query = query.to_lowercase();
    CommandMatches::Filtered(
        available
            .iter()
            .filter(|cmd| cmd.bare_name().to_lowercase().starts_with(&query))
            .cloned()
            .collect(),
    )
}

/// Look up a submitted command name (sigil stripped, already lowercased).
#[must_use]
pub fn resolve<'a>(name: &str, available: &'a [Command]) -> Option<&'a Command> {
    available.iter().find(|cmd| cmd.bare_name() == name)
}
