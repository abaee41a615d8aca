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

//! WebSocket client for the live sensor feed.
//!
//! This module provides a two-layer architecture:
//! - Outer client ([`SensorFeedClient`]): connection supervisor owning one
//!   generation-tagged transport connection at a time.
//! - Inner handler ([`FeedHandler`]): purely synchronous state-transition core
//!   applying parsed messages to the bounded window.
//!
//! The handler is driven by an explicit [`ConnectionEvent`] enum rather than
//! transport callbacks, so the full state machine is testable with synthetic
//! events and no live connection.

pub mod client;
pub mod enums;
pub mod handler;
pub mod messages;

pub use client::SensorFeedClient;
pub use enums::ConnectionStatus;
pub use handler::{ConnectionEvent, FeedHandler};
pub use messages::{FeedMessage, ServerMessage, parse_server_message};
