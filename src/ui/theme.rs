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

use crate::app::LineVariant;
use ratatui::style::Color;

// Accent
pub const EMERALD: Color = Color::Rgb(52, 211, 153);
pub const SKY: Color = Color::Rgb(56, 189, 248);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const TEXT: Color = Color::Rgb(226, 232, 240);
pub const SEPARATOR_CHAR: &str = "─";

// Transcript
pub const PROMPT_LABEL: Color = EMERALD;
pub const ASSISTANT_LABEL: Color = SKY;
pub const LINE_SYSTEM: Color = Color::Rgb(148, 163, 184);
pub const LINE_USER: Color = EMERALD;
pub const LINE_INFO: Color = Color::Yellow;

pub const STATUS_ERROR: Color = Color::Red;
pub const MAP_POINT: Color = Color::Rgb(244, 63, 94);

/// Pending-reply dots, one frame per render tick.
pub const SPINNER_FRAMES: &[&str] = &[
    "\u{2022}    ",
    "\u{2022} \u{2022}  ",
    "\u{2022} \u{2022} \u{2022}",
    "  \u{2022} \u{2022}",
    "    \u{2022}",
    "     ",
];

#[must_use]
pub fn line_color(variant: LineVariant) -> Color {
    match variant {
        LineVariant::System => LINE_SYSTEM,
        LineVariant::User => LINE_USER,
        LineVariant::Info => LINE_INFO,
    }
}
