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

use super::input::InputState;
use crate::docs::{Document, DocumentId, DocumentPage, DocumentStore, PageRequest, StoreError};

/// State of the docs list page: search box, current page and selection.
#[derive(Debug, Default)]
pub struct DocsView {
    pub search: String,
    pub page: DocumentPage,
    /// Cursor of the page being shown; earlier cursors are kept for paging back.
    cursor: Option<usize>,
    previous: Vec<Option<usize>>,
    pub selected: usize,
    pub status: Option<String>,
}

impl DocsView {
    /// Re-run the query for the current page, keeping the selection in range.
    pub fn refresh(&mut self, store: &dyn DocumentStore) {
        let search = Some(self.search.as_str()).filter(|s| !s.trim().is_empty());
        self.page = store.list(search, PageRequest { cursor: self.cursor, ..PageRequest::default() });
        if self.page.items.is_empty() && self.cursor.is_some() {
            self.prev_page(store);
            return;
        }
        self.selected = self.selected.min(self.page.items.len().saturating_sub(1));
    }

    /// Start over from the first page, e.g. after the search changed.
    pub fn restart(&mut self, store: &dyn DocumentStore) {
        self.cursor = None;
        self.previous.clear();
        self.selected = 0;
        self.refresh(store);
    }

    pub fn push_search_char(&mut self, c: char, store: &dyn DocumentStore) {
        self.search.push(c);
        self.restart(store);
    }

    pub fn pop_search_char(&mut self, store: &dyn DocumentStore) {
        if self.search.pop().is_some() {
            self.restart(store);
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.page.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn next_page(&mut self, store: &dyn DocumentStore) {
        let Some(next) = self.page.next_cursor else {
            return;
        };
        self.previous.push(self.cursor);
        self.cursor = Some(next);
        self.selected = 0;
        self.refresh(store);
    }

    pub fn prev_page(&mut self, store: &dyn DocumentStore) {
        let Some(prev) = self.previous.pop() else {
            return;
        };
        self.cursor = prev;
        self.selected = 0;
        self.refresh(store);
    }

    #[must_use]
    pub fn has_prev_page(&self) -> bool {
        !self.previous.is_empty()
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&DocumentId> {
        self.page.items.get(self.selected).map(|d| &d.id)
    }

    /// Create a document titled with the current local time and select it.
    pub fn create(&mut self, store: &mut dyn DocumentStore) -> DocumentId {
        let title = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let id = store.create(Some(title.as_str()), Vec::new());
        self.search.clear();
        self.restart(store);
        self.status = Some(format!("Created \"{title}\""));
        id
    }

    pub fn remove_selected(&mut self, store: &mut dyn DocumentStore) {
        let Some(id) = self.selected_id().cloned() else {
            return;
        };
        self.status = match store.remove(&id) {
            Ok(()) => Some("Document deleted".to_owned()),
            Err(err) => Some(err.to_string()),
        };
        self.refresh(store);
    }
}

/// A single open document with an editable title.
#[derive(Debug)]
pub struct DocumentDetail {
    pub id: DocumentId,
    pub document: Result<Document, StoreError>,
    pub title: InputState,
    pub status: Option<String>,
}

impl DocumentDetail {
    pub fn load(id: DocumentId, store: &dyn DocumentStore) -> Self {
        let document = store.get_by_id(&id);
        let mut title = InputState::new();
        if let Ok(doc) = &document {
            title.set_text(&doc.title);
        }
        Self { id, document, title, status: None }
    }

    /// Save the edited title. Blank titles are rejected.
    pub fn rename(&mut self, store: &mut dyn DocumentStore) {
        let title = self.title.text();
        let title = title.trim();
        if title.is_empty() {
            self.status = Some("Title cannot be empty".to_owned());
            return;
        }
        match store.rename(&self.id, title) {
            Ok(()) => {
                self.document = store.get_by_id(&self.id);
                self.status = Some("Saved".to_owned());
            }
            Err(err) => {
                tracing::warn!(id = %self.id, %err, "rename failed");
                self.status = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::{MemoryDocumentStore, PAGE_SIZE};
    use pretty_assertions::assert_eq;

    fn store_with(n: usize) -> MemoryDocumentStore {
        let mut store = MemoryDocumentStore::new();
        for i in 0..n {
            store.create(Some(format!("doc {i}").as_str()), Vec::new());
        }
        store
    }

    #[test]
    fn pages_forward_and_back() {
        let store = store_with(PAGE_SIZE + 3);
        let mut view = DocsView::default();
        view.restart(&store);
        assert_eq!(view.page.items.len(), PAGE_SIZE);
        assert!(!view.has_prev_page());

        view.next_page(&store);
        assert_eq!(view.page.items.len(), 3);
        assert!(view.has_prev_page());

        view.prev_page(&store);
        assert_eq!(view.page.items.len(), PAGE_SIZE);
        assert_eq!(view.page.items[0].title, format!("doc {}", PAGE_SIZE + 2));
    }

    #[test]
    fn search_filters_and_resets_selection() {
        let store = store_with(12);
        let mut view = DocsView::default();
        view.restart(&store);
        view.select_next();
        view.push_search_char('1', &store);
        assert_eq!(view.selected, 0);
        let titles: Vec<&str> = view.page.items.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["doc 11", "doc 10", "doc 1"]);
        view.pop_search_char(&store);
        assert_eq!(view.page.items.len(), 12);
    }

    #[test]
    fn remove_selected_reports_and_refreshes() {
        let mut store = store_with(2);
        let mut view = DocsView::default();
        view.restart(&store);
        view.remove_selected(&mut store);
        assert_eq!(view.page.items.len(), 1);
        assert_eq!(view.status.as_deref(), Some("Document deleted"));
    }

    #[test]
    fn detail_of_missing_document_is_not_found() {
        let mut store = MemoryDocumentStore::new();
        let mut detail = DocumentDetail::load(DocumentId::from("gone"), &store);
        assert_eq!(detail.document, Err(StoreError::NotFound));
        detail.title.set_text("x");
        detail.rename(&mut store);
        assert_eq!(detail.status.as_deref(), Some("Document not found"));
    }

    #[test]
    fn rename_updates_loaded_document() {
        let mut store = store_with(1);
        let id = store.list(None, PageRequest::default()).items[0].id.clone();
        let mut detail = DocumentDetail::load(id, &store);
        detail.title.set_text("  Renamed ");
        detail.rename(&mut store);
        assert_eq!(detail.document.map(|d| d.title), Ok("Renamed".to_owned()));
    }
}
