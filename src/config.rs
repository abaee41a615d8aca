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

//! Feed client configuration.

use std::num::NonZeroUsize;

/// Default WebSocket endpoint when neither config nor environment provide one.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000/ws";

/// Environment variable consulted for the WebSocket endpoint.
pub const WS_URL_ENV: &str = "SENSOR_FEED_WS_URL";

/// Default maximum number of readings retained in the window.
pub const DEFAULT_WINDOW_SIZE: NonZeroUsize = NonZeroUsize::new(120).unwrap();

/// Configuration for the sensor feed client.
#[derive(Clone, Debug)]
pub struct FeedConfig {
    /// Optional WebSocket endpoint override.
    ///
    /// When `None`, the endpoint is taken from the [`WS_URL_ENV`] environment
    /// variable, falling back to [`DEFAULT_WS_URL`].
    pub url: Option<String>,
    /// Maximum number of readings retained in the window.
    pub window_size: NonZeroUsize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: None,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl FeedConfig {
    /// Resolves the effective WebSocket endpoint for this configuration.
    #[must_use]
    pub fn resolve_url(&self) -> String {
        self.url
            .clone()
            .or_else(|| std::env::var(WS_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_WS_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_default_config() {
        let config = FeedConfig::default();
        assert_eq!(config.window_size.get(), 120);
        assert!(config.url.is_none());
    }

    #[rstest]
    fn test_explicit_url_wins() {
        let config = FeedConfig {
            url: Some("ws://example.com/feed".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_url(), "ws://example.com/feed");
    }
}
