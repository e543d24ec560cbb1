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

//! Document collaborator: a searchable, paginated collection of titled documents.

use crate::chat::{Millis, now_millis};
use std::fmt;

pub const DEFAULT_TITLE: &str = "Untitled document";
pub const ANONYMOUS_OWNER: &str = "anonymous";
pub const PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub owner_id: String,
    /// Body as plain paragraphs.
    pub content: Vec<String>,
    pub created_at: Millis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Offset returned as `next_cursor` by the previous page.
    pub cursor: Option<usize>,
    pub num_items: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { cursor: None, num_items: PAGE_SIZE }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentPage {
    pub items: Vec<DocumentSummary>,
    pub next_cursor: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found")]
    NotFound,
}

pub trait DocumentStore {
    /// Newest first. `search` matches title substrings, ignoring case.
    fn list(&self, search: Option<&str>, page: PageRequest) -> DocumentPage;
    fn create(&mut self, title: Option<&str>, initial_content: Vec<String>) -> DocumentId;
    fn remove(&mut self, id: &DocumentId) -> Result<(), StoreError>;
    fn rename(&mut self, id: &DocumentId, title: &str) -> Result<(), StoreError>;
    fn get_by_id(&self, id: &DocumentId) -> Result<Document, StoreError>;
}

/// Process-local store. Documents live as long as the app.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    /// Oldest first.
    docs: Vec<Document>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &DocumentId) -> Result<usize, StoreError> {
        self.docs.iter().position(|d| &d.id == id).ok_or(StoreError::NotFound)
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn list(&self, search: Option<&str>, page: PageRequest) -> DocumentPage {
        let needle = search.map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase);
        let matching: Vec<&Document> = self
            .docs
            .iter()
            .rev()
            .filter(|d| needle.as_deref().is_none_or(|n| d.title.to_lowercase().contains(n)))
            .collect();

        let start = page.cursor.unwrap_or(0).min(matching.len());
        let end = start.saturating_add(page.num_items.max(1)).min(matching.len());
        let items = matching[start..end]
            .iter()
            .map(|d| DocumentSummary { id: d.id.clone(), title: d.title.clone() })
            .collect();
        DocumentPage { items, next_cursor: (end < matching.len()).then_some(end) }
    }

    fn create(&mut self, title: Option<&str>, initial_content: Vec<String>) -> DocumentId {
        let title = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TITLE);
        let id = DocumentId(uuid::Uuid::new_v4().to_string());
        tracing::info!(%id, title, "document created");
        self.docs.push(Document {
            id: id.clone(),
            title: title.to_owned(),
            owner_id: ANONYMOUS_OWNER.to_owned(),
            content: initial_content,
            created_at: now_millis(),
        });
        id
    }

    fn remove(&mut self, id: &DocumentId) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        self.docs.remove(idx);
        tracing::info!(%id, "document removed");
        Ok(())
    }

    fn rename(&mut self, id: &DocumentId, title: &str) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        title.clone_into(&mut self.docs[idx].title);
        Ok(())
    }

    fn get_by_id(&self, id: &DocumentId) -> Result<Document, StoreError> {
        self.docs.iter().find(|d| &d.id == id).cloned().ok_or(StoreError::NotFound)
    }
}
