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

//! Errors raised by the track store.

use thiserror::Error;

use crate::model::TrackId;

/// Failures of a store operation.
///
/// Every variant aborts the operation that raised it, nothing is retried.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("track {0} not found")]
    NotFound(TrackId),

    #[error("a share link is required")]
    MissingLink,

    #[error("invalid share link \"{link}\": {reason}")]
    InvalidLink { link: String, reason: String },

    #[error("failed to switch to WAL mode, current mode: {0}")]
    JournalMode(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub(crate) type Result<T> = std::result::Result<T, StoreError>;
