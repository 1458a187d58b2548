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

//! Track records and the field sets used to create and update them.

use std::fmt;

use uuid::Uuid;

/// Opaque identifier of a track record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct TrackId(pub(crate) String);

impl TrackId {
    /// Generates a fresh identifier for a record about to be inserted.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A snapshot of one track record as held by the store.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Track {
    pub(crate) id: TrackId,
    pub(crate) name: String,
    /// The share link as entered by the operator.
    pub(crate) source_link: String,
    /// The direct-download link handed to the audio sink.
    pub(crate) playback_link: String,
    pub(crate) order: i64,
    pub(crate) active: bool,
    pub(crate) created_at: i64,
}

/// Fields for a new track record, new records always start active.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewTrack {
    pub(crate) name: String,
    pub(crate) source_link: String,
    pub(crate) playback_link: String,
    pub(crate) order: i64,
}

/// A partial update, only the fields that are set are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TrackUpdate {
    pub(crate) name: Option<String>,
    pub(crate) order: Option<i64>,
    pub(crate) active: Option<bool>,
}

impl TrackUpdate {
    pub(crate) fn order(order: i64) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }

    pub(crate) fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.name.is_none() && self.order.is_none() && self.active.is_none()
    }
}

/// Direction of a single-step reorder in the admin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Up,
    Down,
}
