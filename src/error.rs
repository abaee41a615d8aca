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

//! Feed client error types.

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Error types for the sensor feed client.
///
/// Errors are non-fatal: the most recent one is recorded on the feed state
/// and surfaced to the consumer, where a subsequent successful message clears
/// it again. There is no error queue or history.
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    /// Connection-level failure reported by the transport.
    #[error("Transport error: {0}")]
    Transport(String),
    /// Malformed or schema-invalid inbound payload.
    #[error("Parse error: {0}")]
    Parse(String),
    /// An operation did not complete within its deadline.
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl From<tungstenite::Error> for FeedError {
    fn from(error: tungstenite::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

/// Result type alias for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
