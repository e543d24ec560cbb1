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

use crate::chat::events::{ChatEvent, TurnId};
use crate::chat::model::ChatMessage;
use crate::chat::wire::{self, ChatRequest, Frame, StreamPart};
use anyhow::Context as _;
use eventsource_stream::Eventsource as _;
use futures::StreamExt as _;
use reqwest::Url;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Everything a transport needs to run one turn.
#[derive(Debug, Clone)]
pub struct StreamRequest {
    pub turn: TurnId,
    /// Full conversation, oldest first, ending with the new user message.
    pub messages: Vec<ChatMessage>,
    pub cancel: CancellationToken,
}

/// Starts a streamed completion. Results come back as [`ChatEvent`]s on the
/// App's event channel, never through the return value.
pub trait ChatTransport {
    fn start(&self, request: StreamRequest);
}

#[derive(Clone)]
pub struct HttpChatClient {
    http: reqwest::Client,
    endpoint: Url,
    idle_timeout: Option<Duration>,
    event_tx: mpsc::UnboundedSender<ChatEvent>,
}

impl HttpChatClient {
    pub fn new(
        endpoint: Url,
        idle_timeout: Option<Duration>,
        event_tx: mpsc::UnboundedSender<ChatEvent>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("olumbe-terminal/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, endpoint, idle_timeout, event_tx })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run one turn to completion, forwarding every decoded part in arrival order.
    /// Returns `Ok` on a clean close or cancellation; an `Err` means the turn failed.
    pub async fn stream(&self, request: StreamRequest) -> anyhow::Result<()> {
        let StreamRequest { turn, messages, cancel } = request;
        let body = ChatRequest { messages };
        tracing::debug!(%turn, url = %self.endpoint, messages = body.messages.len(), "POST chat");

        let send = self
            .http
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(&body)
            .send();
        let response = tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!(%turn, "chat request cancelled before response");
                return Ok(());
            }
            res = within(self.idle_timeout, "waiting for chat response", send) => {
                res?.context("chat request failed")?
            }
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.trim();
            if text.is_empty() {
                anyhow::bail!("chat endpoint returned {status}");
            }
            anyhow::bail!("chat endpoint returned {status}: {text}");
        }

        let mut events = Box::pin(response.bytes_stream().eventsource());
        loop {
            let next = tokio::select! {
                () = cancel.cancelled() => {
                    tracing::debug!(%turn, "chat stream cancelled");
                    return Ok(());
                }
                next = within(self.idle_timeout, "chat stream idle", events.next()) => next?,
            };

            let event = match next {
                None => break,
                Some(Ok(event)) => event,
                Some(Err(err)) => anyhow::bail!("chat stream interrupted: {err}"),
            };

            match wire::parse_frame(&event.data) {
                Some(Frame::Done) => break,
                Some(Frame::Part(StreamPart::Error { error_text })) => anyhow::bail!(error_text),
                Some(Frame::Part(part)) => {
                    tracing::trace!(%turn, ?part, "chat stream part");
                    if self.event_tx.send(ChatEvent::Part { turn, part }).is_err() {
                        tracing::debug!(%turn, "event channel closed; dropping chat stream");
                        return Ok(());
                    }
                }
                None => {}
            }
        }

        let _ = self.event_tx.send(ChatEvent::Closed { turn });
        Ok(())
    }
}

/// Await `fut`, failing once `limit` passes without it completing.
async fn within<F: Future>(limit: Option<Duration>, what: &str, fut: F) -> anyhow::Result<F::Output> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| anyhow::anyhow!("{what} for {}ms", limit.as_millis())),
        None => Ok(fut.await),
    }
}

impl ChatTransport for HttpChatClient {
    fn start(&self, request: StreamRequest) {
        let client = self.clone();
        tokio::task::spawn_local(async move {
            let turn = request.turn;
            if let Err(err) = client.stream(request).await {
                let message = format!("{err:#}");
                tracing::error!(%turn, "chat turn failed: {message}");
                let _ = client.event_tx.send(ChatEvent::Failed { turn, message });
            }
        });
    }
}

/// Transport that only records what it was asked to do. Used by
/// `App::test_default` and tests that feed [`ChatEvent`]s by hand.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    requests: Rc<RefCell<Vec<StreamRequest>>>,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn requests(&self) -> Vec<StreamRequest> {
        self.requests.borrow().clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl ChatTransport for RecordingTransport {
    fn start(&self, request: StreamRequest) {
        self.requests.borrow_mut().push(request);
    }
}
