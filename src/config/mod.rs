// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration, persisted with `confy` in the platform's
//! configuration directory.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "trackdeck";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,

    /// Path of the SQLite file holding the track collection.
    pub database_file: String,

    /// Delay before the next play attempt after a track ends or fails.
    pub retry_delay_ms: u64,

    /// How long a status message stays on screen.
    pub notice_secs: u64,

    /// Interval at which the store checks for writes by other processes.
    pub store_poll_ms: u64,

    pub log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            database_file: "tracks.db".to_string(),
            retry_delay_ms: 300,
            notice_secs: 4,
            store_poll_ms: 1000,
            log_file: "trackdeck.log".to_string(),
        }
    }
}

impl AppConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_secs)
    }

    /// Never zero, a zero timeout would spin the store worker.
    pub fn store_poll_interval(&self) -> Duration {
        Duration::from_millis(self.store_poll_ms.max(50))
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_player_timings() {
        let config = AppConfig::default();

        assert_eq!(config.retry_delay(), Duration::from_millis(300));
        assert_eq!(config.notice_duration(), Duration::from_secs(4));
        assert_eq!(config.store_poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn poll_interval_has_a_floor() {
        let config = AppConfig {
            store_poll_ms: 0,
            ..AppConfig::default()
        };

        assert_eq!(config.store_poll_interval(), Duration::from_millis(50));
    }
}
