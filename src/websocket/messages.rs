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

//! Wire message types for the sensor feed.

use serde::{Deserialize, Serialize};

use crate::{
    error::{FeedError, FeedResult},
    model::SensorReading,
    websocket::enums::ConnectionStatus,
};

/// Inbound message from the feed source.
///
/// Payloads are JSON text frames discriminated by a `type` field:
///
/// ```json
/// { "type": "snapshot", "data": [ { "timestamp": "...", "temperature": 21.4, "humidity": 58.1 } ] }
/// { "type": "update",   "data":   { "timestamp": "...", "temperature": 21.4, "humidity": 58.1 } }
/// ```
///
/// An unrecognized `type` or structurally invalid `data` fails to
/// deserialize and is reported as a parse error, never silently dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Authoritative full replacement of the window contents.
    Snapshot(Vec<SensorReading>),
    /// A single incremental reading to append if not already present.
    Update(SensorReading),
}

/// Message emitted to stream consumers after the feed state has been updated.
#[derive(Debug, Clone)]
pub enum FeedMessage {
    /// A snapshot was applied; carries the retained window contents.
    Snapshot(Vec<SensorReading>),
    /// A non-duplicate update was appended to the window.
    Update(SensorReading),
    /// The connection status changed.
    Status(ConnectionStatus),
    /// An error was recorded (transport failure or malformed payload).
    Error(FeedError),
}

/// Parses a raw JSON text frame into a [`ServerMessage`].
///
/// # Errors
///
/// Returns [`FeedError::Parse`] when the payload is not valid JSON, carries
/// an unrecognized `type` discriminator, or its `data` does not match the
/// declared shape.
pub fn parse_server_message(text: &str) -> FeedResult<ServerMessage> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_parse_snapshot() {
        let json = r#"{
            "type": "snapshot",
            "data": [
                {"timestamp": "2025-06-01T12:00:00+00:00", "temperature": 21.4, "humidity": 58.1},
                {"timestamp": "2025-06-01T12:00:01+00:00", "temperature": 21.5, "humidity": 58.0}
            ]
        }"#;

        let msg = parse_server_message(json).unwrap();
        match msg {
            ServerMessage::Snapshot(readings) => {
                assert_eq!(readings.len(), 2);
                assert_eq!(readings[0].timestamp, "2025-06-01T12:00:00+00:00");
            }
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    #[rstest]
    fn test_parse_update() {
        let json = r#"{
            "type": "update",
            "data": {"timestamp": "2025-06-01T12:00:02+00:00", "temperature": 21.6, "humidity": 57.9}
        }"#;

        let msg = parse_server_message(json).unwrap();
        assert!(matches!(msg, ServerMessage::Update(r) if r.temperature == 21.6));
    }

    #[rstest]
    fn test_parse_update_tolerates_extra_fields() {
        let json = r#"{
            "type": "update",
            "data": {"id": 7, "timestamp": "t", "temperature": 1.0, "humidity": 2.0}
        }"#;

        assert!(parse_server_message(json).is_ok());
    }

    #[rstest]
    #[case(r#"{"type": "bogus", "data": {}}"#)]
    #[case(r#"{"type": "update", "data": {"timestamp": "t"}}"#)]
    #[case(r#"{"type": "snapshot", "data": {"timestamp": "t"}}"#)]
    #[case(r#"{"data": []}"#)]
    #[case("not json at all")]
    fn test_parse_failures(#[case] payload: &str) {
        let err = parse_server_message(payload).unwrap_err();
        assert!(matches!(err, FeedError::Parse(ref reason) if !reason.is_empty()));
    }

    #[rstest]
    fn test_serialize_round_trip() {
        let msg = ServerMessage::Update(SensorReading::new("t1", 20.0, 50.0));
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(parse_server_message(&json).unwrap(), msg);
    }
}
