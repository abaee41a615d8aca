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

//! Sensor reading value type.

use serde::{Deserialize, Serialize};

/// A single timestamped sensor reading.
///
/// The timestamp is an ISO-8601 string and serves as the dedupe/order key
/// within one stream; arrival order is not guaranteed monotonic. Unknown
/// fields in inbound payloads (e.g. a database row id) are ignored on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// ISO-8601 timestamp, the identity of the reading within a stream.
    pub timestamp: String,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
}

impl SensorReading {
    /// Creates a new [`SensorReading`].
    #[must_use]
    pub fn new(timestamp: impl Into<String>, temperature: f64, humidity: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            temperature,
            humidity,
        }
    }
}
