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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Invalid chat endpoint")]
    InvalidEndpoint,
    #[error("Location file could not be read")]
    LocationsUnreadable,
    #[error("Terminal unavailable")]
    TerminalUnavailable,
}

impl AppError {
    pub const INVALID_ENDPOINT_EXIT_CODE: i32 = 20;
    pub const LOCATIONS_UNREADABLE_EXIT_CODE: i32 = 21;
    pub const TERMINAL_UNAVAILABLE_EXIT_CODE: i32 = 22;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidEndpoint => Self::INVALID_ENDPOINT_EXIT_CODE,
            Self::LocationsUnreadable => Self::LOCATIONS_UNREADABLE_EXIT_CODE,
            Self::TerminalUnavailable => Self::TERMINAL_UNAVAILABLE_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidEndpoint => {
                "Invalid chat endpoint. Pass an http(s) URL with --endpoint or set OLUMBE_CHAT_ENDPOINT."
            }
            Self::LocationsUnreadable => {
                "The location file could not be read or is not a JSON array of location rows."
            }
            Self::TerminalUnavailable => "Could not initialize the terminal. Is stdout a TTY?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_and_above_generic_failure() {
        let codes = [
            AppError::InvalidEndpoint.exit_code(),
            AppError::LocationsUnreadable.exit_code(),
            AppError::TerminalUnavailable.exit_code(),
        ];
        assert!(codes.iter().all(|c| *c >= 20));
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
    }
}
