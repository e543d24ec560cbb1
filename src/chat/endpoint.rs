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

use crate::error::AppError;
use anyhow::Context as _;
use reqwest::Url;

pub const ENDPOINT_ENV: &str = "OLUMBE_CHAT_ENDPOINT";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/chat";

/// Pick the chat endpoint: explicit flag, then `OLUMBE_CHAT_ENDPOINT`, then the
/// local dev server.
pub fn resolve_endpoint(explicit: Option<&str>) -> anyhow::Result<Url> {
    if let Some(raw) = explicit {
        return parse_endpoint(raw);
    }

    if let Ok(raw) = std::env::var(ENDPOINT_ENV)
        && !raw.trim().is_empty()
    {
        return parse_endpoint(&raw).with_context(|| format!("from ${ENDPOINT_ENV}"));
    }

    parse_endpoint(DEFAULT_ENDPOINT)
}

fn parse_endpoint(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|_| anyhow::Error::new(AppError::InvalidEndpoint))
        .with_context(|| format!("invalid chat endpoint `{raw}`"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow::Error::new(AppError::InvalidEndpoint))
            .with_context(|| format!("chat endpoint must be http or https: `{raw}`"));
    }
    Ok(url)
}
