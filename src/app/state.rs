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

use super::commands::{self, CommandMatches};
use super::dispatch::{Outcome, TerminalState};
use super::docs_view::{DocsView, DocumentDetail};
use super::input::InputState;
use super::navigation::{Location, Navigator, Router};
use crate::Cli;
use crate::chat::{ChatEvent, ChatTransport, HttpChatClient, RecordingTransport, now_millis};
use crate::docs::{DocumentStore, MemoryDocumentStore};
use crate::locations::{ListLocations, LocationRow, LocationSource, StaticLocations};
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Which widget receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    #[default]
    Terminal,
    DocsList,
    DocumentTitle,
}

pub struct App {
    pub terminal: TerminalState,
    pub router: Router,
    pub input: InputState,
    pub focus: FocusTarget,
    pub docs: DocsView,
    pub detail: Option<DocumentDetail>,
    pub documents: Box<dyn DocumentStore>,
    pub location_source: Box<dyn LocationSource>,
    pub locations: Vec<LocationRow>,
    pub location_error: Option<String>,
    pub event_tx: mpsc::UnboundedSender<ChatEvent>,
    pub event_rx: mpsc::UnboundedReceiver<ChatEvent>,
    pub should_quit: bool,
    /// Force a full terminal clear on next render frame.
    pub force_redraw: bool,
    /// Transcript scroll position in rows from the top.
    pub scroll_offset: usize,
    /// Largest valid `scroll_offset`, refreshed by every render.
    pub scroll_max: usize,
    pub auto_scroll: bool,
    pub spinner_frame: usize,
}

impl App {
    #[must_use]
    pub fn new(
        transport: Rc<dyn ChatTransport>,
        documents: Box<dyn DocumentStore>,
        location_source: Box<dyn LocationSource>,
        start: Location,
        events: (mpsc::UnboundedSender<ChatEvent>, mpsc::UnboundedReceiver<ChatEvent>),
    ) -> Self {
        let (event_tx, event_rx) = events;
        let mut app = Self {
            terminal: TerminalState::new(transport),
            router: Router::new(start),
            input: InputState::new(),
            focus: FocusTarget::Terminal,
            docs: DocsView::default(),
            detail: None,
            documents,
            location_source,
            locations: Vec::new(),
            location_error: None,
            event_tx,
            event_rx,
            should_quit: false,
            force_redraw: false,
            scroll_offset: 0,
            scroll_max: 0,
            auto_scroll: true,
            spinner_frame: 0,
        };
        app.enter_page();
        app
    }

    /// App wired to a [`RecordingTransport`], an empty document store and no
    /// locations. Starts on the home page.
    #[doc(hidden)]
    #[must_use]
    pub fn test_default() -> Self {
        Self::test_with(Rc::new(RecordingTransport::new()), Location::Home)
    }

    #[doc(hidden)]
    #[must_use]
    pub fn test_with(transport: Rc<dyn ChatTransport>, start: Location) -> Self {
        Self::new(
            transport,
            Box::new(MemoryDocumentStore::new()),
            Box::new(StaticLocations::default()),
            start,
            mpsc::unbounded_channel(),
        )
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        self.router.current()
    }

    /// Autocomplete state for the current draft and page.
    #[must_use]
    pub fn command_matches(&self) -> CommandMatches {
        let available = commands::available_commands(self.router.current());
        commands::match_commands(&self.input.text(), &available)
    }

    /// Replace the draft with the first candidate. Returns false when there is none.
    pub fn complete_command(&mut self) -> bool {
        let matches = self.command_matches();
        let Some(first) = matches.commands().first() else {
            return false;
        };
        self.input.set_text(first.name);
        true
    }

    /// Hand the draft to the dispatcher and react to where it went.
    pub fn submit_input(&mut self) -> Outcome {
        let text = self.input.take_text();
        let outcome = self.terminal.handle(&mut self.router, &text);
        if !matches!(outcome, Outcome::Ignored) {
            self.auto_scroll = true;
        }
        if let Outcome::Navigated(_) = &outcome {
            self.enter_page();
        }
        outcome
    }

    pub fn handle_chat_event(&mut self, event: ChatEvent) {
        if let Some(id) = self.terminal.session.apply(event) {
            self.terminal.timestamps.observe(&id, now_millis());
        }
    }

    pub fn stop_stream(&mut self) {
        self.terminal.session.stop();
    }

    /// Switch page from the UI (not through a command): no transcript change.
    pub fn go_to(&mut self, to: Location) {
        self.router.navigate(to);
        self.enter_page();
    }

    pub fn go_back(&mut self) {
        if !self.router.back() {
            self.router.navigate(Location::Docs);
        }
        self.enter_page();
    }

    /// Load whatever the current page shows and reset focus for it.
    pub fn enter_page(&mut self) {
        self.focus = FocusTarget::Terminal;
        self.detail = None;
        match self.router.current().clone() {
            Location::Docs => self.docs.restart(self.documents.as_ref()),
            Location::Document(id) => {
                self.detail = Some(DocumentDetail::load(id, self.documents.as_ref()));
                self.focus = FocusTarget::DocumentTitle;
            }
            Location::Map => self.refresh_locations(),
            Location::Home | Location::About => {}
        }
    }

    pub fn refresh_locations(&mut self) {
        match self.location_source.list(ListLocations::for_map()) {
            Ok(rows) => {
                tracing::debug!(count = rows.len(), "locations loaded");
                self.locations = rows;
                self.location_error = None;
            }
            Err(err) => {
                tracing::warn!("failed to load locations: {err:#}");
                self.location_error = Some(format!("{err:#}"));
            }
        }
    }

    pub fn open_selected_document(&mut self) {
        if let Some(id) = self.docs.selected_id().cloned() {
            self.go_to(Location::Document(id));
        }
    }

    pub fn create_document(&mut self) {
        let id = self.docs.create(self.documents.as_mut());
        tracing::debug!(%id, "created from docs page");
    }

    pub fn remove_selected_document(&mut self) {
        self.docs.remove_selected(self.documents.as_mut());
    }

    pub fn rename_open_document(&mut self) {
        if let Some(detail) = self.detail.as_mut() {
            detail.rename(self.documents.as_mut());
        }
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.min(self.scroll_max).saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(rows);
        if self.scroll_offset >= self.scroll_max {
            self.scroll_offset = self.scroll_max;
            self.auto_scroll = true;
        }
    }
}

/// Build the app from the command line: resolve the endpoint and location
/// file, then open on the requested page.
pub fn create_app(cli: &Cli) -> anyhow::Result<App> {
    let endpoint = crate::chat::endpoint::resolve_endpoint(cli.endpoint.as_deref())?;
    tracing::info!(%endpoint, "chat endpoint resolved");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let idle_timeout = cli.stream_idle_timeout_secs.filter(|s| *s > 0).map(Duration::from_secs);
    let client = HttpChatClient::new(endpoint, idle_timeout, event_tx.clone())?;

    let location_source: Box<dyn LocationSource> =
        match crate::locations::resolve_locations_file(cli.locations.as_deref()) {
            Some(file) => {
                tracing::info!(path = %file.path().display(), "location file");
                // Fail at startup rather than on the map page.
                file.list(ListLocations::for_map())?;
                Box::new(file)
            }
            None => Box::new(StaticLocations::default()),
        };

    Ok(App::new(
        Rc::new(client),
        Box::new(MemoryDocumentStore::new()),
        location_source,
        cli.start.into(),
        (event_tx, event_rx),
    ))
}
