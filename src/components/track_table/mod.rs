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

//! Admin track table widget and state management.
//!
//! This module provides the table listing every track record in order, with
//! per-row actions. Key handling lives in `event`, drawing in `render`. The
//! table never touches the store itself, it returns a [`TrackTableAction`]
//! for the caller to carry out.

mod event;
mod render;

use ratatui::widgets::TableState;

use crate::model::{Direction, Track, TrackId};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TrackTableAction {
    Move(TrackId, Direction),
    SetActive(TrackId, bool),
    /// Toggle the preview of this playback link.
    Preview(String),
    /// Delete this track, once confirmed.
    Delete(Track),
}

pub(crate) struct TrackTable {
    tracks: Vec<Track>,
    table_state: TableState,
}

impl TrackTable {
    pub(crate) fn new() -> Self {
        Self {
            tracks: vec![],
            table_state: TableState::new(),
        }
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Replaces the rows, keeping the selection on the same track when it is
    /// still listed.
    pub(crate) fn set_tracks(&mut self, tracks: Vec<Track>) {
        let selected_id = self.selected_track().map(|t| t.id.clone());
        let selected_idx = self.table_state.selected();

        self.tracks = tracks;

        let len = self.tracks.len();
        let idx = selected_id
            .and_then(|id| self.tracks.iter().position(|t| t.id == id))
            .or_else(|| selected_idx.map(|i| i.min(len.saturating_sub(1))))
            .or(Some(0))
            .filter(|_| len > 0);

        self.table_state.select(idx);
    }

    pub(crate) fn selected_track(&self) -> Option<&Track> {
        self.table_state
            .selected()
            .and_then(|idx| self.tracks.get(idx))
    }

    fn goto_next(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self) {
        if !self.tracks.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self) {
        if let Some(last) = self.tracks.len().checked_sub(1) {
            self.table_state.select(Some(last));
        }
    }
}
