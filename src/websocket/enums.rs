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

//! Enumerations for the feed connection lifecycle.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Health of the underlying feed connection.
///
/// Exactly one value at any instant; transitions happen only through the
/// connection supervisor. Neither `Closed` nor `Error` is terminal: both
/// re-enter `Connecting` on restart or endpoint change.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionStatus {
    /// A connection attempt is in flight; no transport event has resolved it yet.
    Connecting,
    /// The transport handshake completed and messages may arrive.
    Open,
    /// The transport reported a failure (including a failed handshake).
    Error,
    /// The connection is closed, orderly or never started.
    #[default]
    Closed,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ConnectionStatus::Connecting, "connecting")]
    #[case(ConnectionStatus::Open, "open")]
    #[case(ConnectionStatus::Error, "error")]
    #[case(ConnectionStatus::Closed, "closed")]
    fn test_status_round_trip(#[case] status: ConnectionStatus, #[case] text: &str) {
        assert_eq!(status.to_string(), text);
        assert_eq!(ConnectionStatus::from_str(text).unwrap(), status);
        assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{text}\""));
    }

    #[rstest]
    fn test_default_is_closed() {
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::Closed);
    }
}
