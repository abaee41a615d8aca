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

//! WebSocket feed client for live sensor telemetry.
//!
//! The crate maintains a bounded, deduplicated, time-ordered window of the most
//! recent sensor readings received over a persistent WebSocket connection,
//! together with a connection-health status for a consuming display layer.
//!
//! Two strictly layered components:
//!
//! - [`SensorFeedClient`]: the connection supervisor. Owns one underlying
//!   transport connection at a time, tracks its lifecycle as a four-state
//!   [`ConnectionStatus`], and re-creates it when the target endpoint changes.
//!   Each connection carries a generation tag so late events from a superseded
//!   connection can never mutate current state.
//! - [`FeedHandler`](websocket::FeedHandler): the window reconciler. Consumes
//!   transport events as an explicit [`ConnectionEvent`](websocket::ConnectionEvent)
//!   enum processed by a single state-transition function, applying parsed
//!   messages to the capacity-bounded, duplicate-free [`Window`].
//!
//! The server is treated as an untrusted message source: payloads are
//! validated, malformed input is recorded as a parse error and never applied.
//! Transport failures never discard the last good window, so the display layer
//! can keep rendering while the status badge shows `error`.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod model;
pub mod websocket;
pub mod window;

pub use config::FeedConfig;
pub use error::{FeedError, FeedResult};
pub use model::SensorReading;
pub use websocket::{ConnectionStatus, FeedMessage, SensorFeedClient, ServerMessage};
pub use window::Window;
