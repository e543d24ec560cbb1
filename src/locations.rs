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

//! Read-only geolocation points for the map page.

use crate::error::AppError;
use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const LOCATIONS_ENV: &str = "OLUMBE_LOCATIONS";
pub const DEFAULT_LIMIT: usize = 100;
/// What the map page asks for.
pub const MAP_LIMIT: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRow {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLocations {
    pub limit: usize,
    pub order: SortOrder,
}

impl Default for ListLocations {
    fn default() -> Self {
        Self { limit: DEFAULT_LIMIT, order: SortOrder::Desc }
    }
}

impl ListLocations {
    #[must_use]
    pub fn for_map() -> Self {
        Self { limit: MAP_LIMIT, ..Self::default() }
    }
}

pub trait LocationSource {
    fn list(&self, query: ListLocations) -> anyhow::Result<Vec<LocationRow>>;
}

/// Sort by timestamp in the requested order and keep the first `limit` rows.
#[must_use]
pub fn select(mut rows: Vec<LocationRow>, query: ListLocations) -> Vec<LocationRow> {
    match query.order {
        SortOrder::Asc => rows.sort_by_key(|r| r.timestamp),
        SortOrder::Desc => rows.sort_by_key(|r| std::cmp::Reverse(r.timestamp)),
    }
    rows.truncate(query.limit);
    rows
}

/// Rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticLocations {
    rows: Vec<LocationRow>,
}

impl StaticLocations {
    #[must_use]
    pub fn new(rows: Vec<LocationRow>) -> Self {
        Self { rows }
    }
}

impl LocationSource for StaticLocations {
    fn list(&self, query: ListLocations) -> anyhow::Result<Vec<LocationRow>> {
        Ok(select(self.rows.clone(), query))
    }
}

/// A JSON array of rows on disk, re-read on every `list`.
#[derive(Debug, Clone)]
pub struct JsonLocationFile {
    path: PathBuf,
    /// A missing file is an empty map instead of an error.
    optional: bool,
}

impl JsonLocationFile {
    #[must_use]
    pub fn new(path: PathBuf, optional: bool) -> Self {
        Self { path, optional }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocationSource for JsonLocationFile {
    fn list(&self, query: ListLocations) -> anyhow::Result<Vec<LocationRow>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if self.optional && err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no location file; map is empty");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(anyhow::Error::new(AppError::LocationsUnreadable))
                    .with_context(|| format!("failed to read {}: {err}", self.path.display()));
            }
        };
        let rows: Vec<LocationRow> = serde_json::from_str(&raw)
            .map_err(|err| {
                anyhow::Error::new(AppError::LocationsUnreadable).context(format!("{err}"))
            })
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(select(rows, query))
    }
}

/// Pick the location file: explicit flag, then `OLUMBE_LOCATIONS`, then the
/// per-user data dir. Only the last one may be missing.
#[must_use]
pub fn resolve_locations_file(explicit: Option<&Path>) -> Option<JsonLocationFile> {
    if let Some(path) = explicit {
        return Some(JsonLocationFile::new(path.to_path_buf(), false));
    }
    if let Some(raw) = std::env::var_os(LOCATIONS_ENV)
        && !raw.is_empty()
    {
        return Some(JsonLocationFile::new(PathBuf::from(raw), false));
    }
    dirs::data_dir()
        .map(|dir| JsonLocationFile::new(dir.join("olumbe").join("locations.json"), true))
}
