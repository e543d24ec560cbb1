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

pub mod app;
pub mod chat;
pub mod docs;
pub mod error;
pub mod locations;
pub mod ui;

use clap::{Parser, ValueEnum};

/// Page the app opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StartPage {
    #[default]
    Home,
    About,
    Docs,
    Map,
}

impl From<StartPage> for app::Location {
    fn from(page: StartPage) -> Self {
        match page {
            StartPage::Home => Self::Home,
            StartPage::About => Self::About,
            StartPage::Docs => Self::Docs,
            StartPage::Map => Self::Map,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "olumbe", version, about = "The olumbe portfolio as a terminal app")]
pub struct Cli {
    /// Chat endpoint URL (falls back to `OLUMBE_CHAT_ENDPOINT`, then the local dev server)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Page to open on
    #[arg(long, value_enum, default_value_t = StartPage::Home)]
    pub start: StartPage,

    /// JSON file of location rows for the map (falls back to `OLUMBE_LOCATIONS`)
    #[arg(long, value_name = "PATH")]
    pub locations: Option<std::path::PathBuf>,

    /// Fail a chat stream that sends nothing for this many seconds
    #[arg(long, value_name = "SECS")]
    pub stream_idle_timeout_secs: Option<u64>,

    /// Write tracing diagnostics to a file (disabled unless explicitly set)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives (example: `info,olumbe_terminal::chat=debug`)
    /// Falls back to `RUST_LOG` when omitted.
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to `--log-file` instead of truncating on startup
    #[arg(long)]
    pub log_append: bool,
}

/// Filter used for `--log-file` when neither `--log-filter` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,olumbe_terminal=info";

impl Cli {
    /// Tracing directives: `--log-filter`, then `RUST_LOG`, then [`DEFAULT_LOG_FILTER`].
    #[must_use]
    pub fn log_directives(&self) -> String {
        self.log_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok().filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned())
    }
}
