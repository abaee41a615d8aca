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

//! Feed state-transition core.
//!
//! Transport callbacks are flattened into one [`ConnectionEvent`] enum
//! processed by a single transition function, [`FeedHandler::handle_event`].
//! All mutations run synchronously to completion, so the window's
//! sequence/seen-set consistency is never observable in a transitional state,
//! and the whole machine is testable by injecting synthetic events.

use std::num::NonZeroUsize;

use tokio::sync::mpsc::UnboundedSender;

use crate::{
    error::FeedError,
    model::SensorReading,
    websocket::{
        enums::ConnectionStatus,
        messages::{FeedMessage, ServerMessage, parse_server_message},
    },
    window::Window,
};

/// Lifecycle and payload events delivered by one transport connection, in
/// transport order.
#[derive(Debug, Clone)]
pub enum ConnectionEvent {
    /// The transport handshake completed.
    Open,
    /// A text payload arrived.
    Message(String),
    /// The transport reported a failure, with a human-readable reason.
    Error(String),
    /// The connection closed (server close frame or end of stream).
    Closed,
}

/// Feed reconciliation state: connection status, bounded window, last error.
///
/// The handler owns the window exclusively; every mutation goes through
/// [`Self::handle_event`], [`Self::begin_connecting`], or [`Self::reset`].
/// Applied messages and status transitions are forwarded to stream consumers
/// through an unbounded channel; sends to a dropped receiver are ignored.
#[derive(Debug)]
pub struct FeedHandler {
    status: ConnectionStatus,
    window: Window,
    last_error: Option<FeedError>,
    out_tx: UnboundedSender<FeedMessage>,
}

impl FeedHandler {
    /// Creates a new handler with an empty window.
    #[must_use]
    pub fn new(window_size: NonZeroUsize, out_tx: UnboundedSender<FeedMessage>) -> Self {
        Self {
            status: ConnectionStatus::Closed,
            window: Window::new(window_size),
            last_error: None,
            out_tx,
        }
    }

    /// Processes one transport event.
    ///
    /// The most recent outcome always wins: a successful message clears any
    /// recorded error, a new error overwrites an old one. Parse failures
    /// never affect the connection status; transport failures never affect
    /// the window contents.
    pub fn handle_event(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Open => {
                tracing::info!("Feed connection open");
                self.last_error = None;
                self.transition(ConnectionStatus::Open);
            }
            ConnectionEvent::Message(payload) => self.handle_payload(&payload),
            ConnectionEvent::Error(reason) => {
                tracing::error!(%reason, "Feed transport error");
                self.record_error(FeedError::Transport(reason));
                self.transition(ConnectionStatus::Error);
            }
            ConnectionEvent::Closed => {
                tracing::info!("Feed connection closed");
                self.transition(ConnectionStatus::Closed);
            }
        }
    }

    /// Marks the start of a new connection attempt.
    ///
    /// Sets status to `Connecting` and clears any previously reported error,
    /// before any event from the new transport can arrive.
    pub fn begin_connecting(&mut self) {
        self.last_error = None;
        self.transition(ConnectionStatus::Connecting);
    }

    /// Clears the window, independent of any in-flight connection activity.
    pub fn reset(&mut self) {
        self.window.reset();
    }

    /// Returns the current connection status.
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Returns the retained readings in chronological order.
    #[must_use]
    pub fn readings(&self) -> Vec<SensorReading> {
        self.window.to_vec()
    }

    /// Returns the most recent reading, if any.
    #[must_use]
    pub fn latest(&self) -> Option<SensorReading> {
        self.window.latest().cloned()
    }

    /// Returns the most recently recorded error, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<FeedError> {
        self.last_error.clone()
    }

    /// Returns a read-only view of the window.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    fn handle_payload(&mut self, payload: &str) {
        match parse_server_message(payload) {
            Ok(message) => {
                self.last_error = None;
                self.apply(message);
            }
            Err(error) => {
                tracing::warn!(%error, "Discarding malformed feed payload");
                self.record_error(error);
            }
        }
    }

    fn apply(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::Snapshot(readings) => {
                self.window.apply_snapshot(readings);
                tracing::debug!(len = self.window.len(), "Applied snapshot");
                self.emit(FeedMessage::Snapshot(self.window.to_vec()));
            }
            ServerMessage::Update(reading) => {
                if self.window.apply_update(reading.clone()) {
                    self.emit(FeedMessage::Update(reading));
                } else {
                    tracing::debug!(timestamp = %reading.timestamp, "Ignoring duplicate reading");
                }
            }
        }
    }

    fn record_error(&mut self, error: FeedError) {
        self.last_error = Some(error.clone());
        self.emit(FeedMessage::Error(error));
    }

    fn transition(&mut self, next: ConnectionStatus) {
        if self.status != next {
            tracing::debug!(from = %self.status, to = %next, "Connection status changed");
            self.status = next;
            self.emit(FeedMessage::Status(next));
        }
    }

    fn emit(&self, message: FeedMessage) {
        let _ = self.out_tx.send(message);
    }
}
