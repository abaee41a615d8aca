// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Connection supervisor for the sensor feed.
//!
//! The [`SensorFeedClient`] owns at most one live transport connection, bound
//! to a target endpoint. Each connection runs in a dedicated reader task
//! tagged with a generation number; `connect`, `close`, and `reconnect_to`
//! bump the generation, so events dispatched by a superseded connection are
//! inert by construction. No automatic reconnect or backoff lives here: a
//! supervising layer may wrap the client when that policy is wanted.

use std::{
    fmt::Debug,
    num::NonZeroUsize,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use futures_util::{SinkExt, Stream, StreamExt};
use parking_lot::RwLock;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tokio_util::sync::CancellationToken;

use crate::{
    config::FeedConfig,
    error::{FeedError, FeedResult},
    model::SensorReading,
    websocket::{
        enums::ConnectionStatus,
        handler::{ConnectionEvent, FeedHandler},
        messages::FeedMessage,
    },
};

/// State shared between the client and its reader tasks.
///
/// The generation check and the state transition happen under one lock, so a
/// late event from a superseded connection can never mutate current state.
pub(crate) struct FeedShared {
    generation: AtomicU64,
    handler: RwLock<FeedHandler>,
}

impl FeedShared {
    fn dispatch(&self, generation: u64, event: ConnectionEvent) {
        let mut handler = self.handler.write();
        if self.generation.load(Ordering::Acquire) != generation {
            tracing::trace!(generation, "Dropping event from superseded connection");
            return;
        }
        handler.handle_event(event);
    }
}

/// WebSocket client maintaining a bounded window of live sensor readings.
///
/// The consumer surface is poll-style ([`Self::status`], [`Self::readings`],
/// [`Self::last_error`]) plus an optional push-style [`Self::stream`] of
/// applied messages and status transitions.
pub struct SensorFeedClient {
    url: String,
    window_size: NonZeroUsize,
    shared: Arc<FeedShared>,
    cancel: CancellationToken,
    task_handle: Option<tokio::task::JoinHandle<()>>,
    out_rx: Option<UnboundedReceiver<FeedMessage>>,
}

impl Debug for SensorFeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(SensorFeedClient))
            .field("url", &self.url)
            .field("window_size", &self.window_size)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl SensorFeedClient {
    /// Creates a new [`SensorFeedClient`] instance.
    ///
    /// The endpoint is resolved from the config (explicit value, then the
    /// `SENSOR_FEED_WS_URL` environment variable, then the default). Nothing
    /// is connected yet; the status starts as `closed`.
    #[must_use]
    pub fn new(config: FeedConfig) -> Self {
        let url = config.resolve_url();
        let (out_tx, out_rx) = tokio::sync::mpsc::unbounded_channel();
        let shared = Arc::new(FeedShared {
            generation: AtomicU64::new(0),
            handler: RwLock::new(FeedHandler::new(config.window_size, out_tx)),
        });

        Self {
            url,
            window_size: config.window_size,
            shared,
            cancel: CancellationToken::new(),
            task_handle: None,
            out_rx: Some(out_rx),
        }
    }

    /// Opens a connection to the configured endpoint.
    ///
    /// The status moves to `connecting` and any previously reported error is
    /// cleared synchronously, before any event from the new transport can
    /// arrive. The handshake itself runs in a spawned reader task and
    /// reports `open` or `error` as events. Any previous connection is
    /// superseded first (teardown-then-recreate, never two live connections
    /// for one client).
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn connect(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();

        let generation = self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.shared.handler.write().begin_connecting();

        tracing::info!(url = %self.url, generation, "Connecting to sensor feed");

        let shared = self.shared.clone();
        let url = self.url.clone();
        let token = self.cancel.clone();
        self.task_handle = Some(tokio::spawn(run_connection(url, generation, shared, token)));
    }

    /// Closes the active connection and releases its task handle.
    ///
    /// Idempotent: safe to call when never connected or already closed. The
    /// status moves to `closed`; no error is recorded for an orderly close.
    pub fn close(&mut self) {
        self.shared.generation.fetch_add(1, Ordering::AcqRel);
        self.cancel.cancel();
        self.task_handle = None;
        self.shared.handler.write().handle_event(ConnectionEvent::Closed);

        tracing::info!(url = %self.url, "Sensor feed connection closed");
    }

    /// Switches the client to a new endpoint.
    ///
    /// Equivalent to [`Self::close`] followed by [`Self::connect`] against
    /// `url`: the status returns to `connecting` and the visible error is
    /// cleared before the new attempt begins. The window is retained.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn reconnect_to(&mut self, url: impl Into<String>) {
        self.close();
        self.url = url.into();
        self.connect();
    }

    /// Clears the window, independent of any in-flight connection activity.
    pub fn reset(&self) {
        self.shared.handler.write().reset();
    }

    /// Returns the current connection status.
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.shared.handler.read().status()
    }

    /// Returns whether the connection is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status() == ConnectionStatus::Open
    }

    /// Returns the retained readings in chronological order.
    #[must_use]
    pub fn readings(&self) -> Vec<SensorReading> {
        self.shared.handler.read().readings()
    }

    /// Returns the most recent reading, if any.
    #[must_use]
    pub fn latest(&self) -> Option<SensorReading> {
        self.shared.handler.read().latest()
    }

    /// Returns the most recently recorded error, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<FeedError> {
        self.shared.handler.read().last_error()
    }

    /// Returns the target endpoint.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the configured window capacity.
    #[must_use]
    pub fn window_size(&self) -> NonZeroUsize {
        self.window_size
    }

    /// Waits until the connection is open or the timeout expires.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Timeout`] if the connection is not open within
    /// `timeout`.
    pub async fn wait_until_open(&self, timeout: Duration) -> FeedResult<()> {
        tokio::time::timeout(timeout, async {
            while !self.is_open() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .map_err(|_| FeedError::Timeout(format!("connection not open after {timeout:?}")))
    }

    /// Returns a stream of [`FeedMessage`] values.
    ///
    /// The stream spans reconnects and yields applied snapshots, applied
    /// (non-duplicate) updates, status transitions, and recorded errors.
    ///
    /// # Panics
    ///
    /// Panics if called twice (the receiver can only be taken once).
    pub fn stream(&mut self) -> impl Stream<Item = FeedMessage> + 'static {
        let mut out_rx = self
            .out_rx
            .take()
            .expect("Feed stream receiver already taken");

        async_stream::stream! {
            while let Some(message) = out_rx.recv().await {
                yield message;
            }
        }
    }
}

/// Runs one transport connection to completion, dispatching its lifecycle
/// and payload events in transport order under the given generation tag.
async fn run_connection(
    url: String,
    generation: u64,
    shared: Arc<FeedShared>,
    token: CancellationToken,
) {
    let (ws_stream, _response) = match connect_async(url.as_str()).await {
        Ok(ok) => ok,
        Err(e) => {
            shared.dispatch(
                generation,
                ConnectionEvent::Error(format!("WebSocket handshake failed: {e}")),
            );
            return;
        }
    };

    shared.dispatch(generation, ConnectionEvent::Open);

    let (mut sink, mut stream) = ws_stream.split();

    loop {
        tokio::select! {
            () = token.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    shared.dispatch(generation, ConnectionEvent::Message(text.as_str().to_string()));
                }
                Some(Ok(Message::Ping(payload))) => {
                    let _ = sink.send(Message::Pong(payload)).await;
                }
                Some(Ok(Message::Close(_))) | None => {
                    shared.dispatch(generation, ConnectionEvent::Closed);
                    break;
                }
                Some(Ok(_)) => {} // binary/pong frames are not part of the feed
                Some(Err(e)) => {
                    shared.dispatch(generation, ConnectionEvent::Error(e.to_string()));
                    break;
                }
            }
        }
    }

    tracing::debug!(generation, "Connection task finished");
}
