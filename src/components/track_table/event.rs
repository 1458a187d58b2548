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

//! Input handling and event processing for the track table.
//!
//! This module maps raw terminal keyboard events to table navigation and to
//! the row actions returned to the caller.

use crossterm::event::{Event, KeyCode};

use crate::{
    components::{TrackTable, TrackTableAction},
    model::Direction,
};

impl TrackTable {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<TrackTableAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        // Internal events
        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.goto_next(),
            KeyCode::Char('k') | KeyCode::Up => self.goto_previous(),
            KeyCode::Char('g') | KeyCode::Home => self.goto_first(),
            KeyCode::Char('G') | KeyCode::End => self.goto_last(),
            _ => {}
        }

        // External events that result in a table action
        let idx = self.table_state.selected()?;
        let track = self.tracks.get(idx)?;

        match key_event.code {
            KeyCode::Char('K') if idx > 0 => {
                Some(TrackTableAction::Move(track.id.clone(), Direction::Up))
            }
            KeyCode::Char('J') if idx + 1 < self.tracks.len() => {
                Some(TrackTableAction::Move(track.id.clone(), Direction::Down))
            }
            KeyCode::Char('t') => Some(TrackTableAction::SetActive(
                track.id.clone(),
                !track.active,
            )),
            KeyCode::Char('p') => Some(TrackTableAction::Preview(track.playback_link.clone())),
            KeyCode::Char('x') | KeyCode::Delete => Some(TrackTableAction::Delete(track.clone())),
            _ => None,
        }
    }
}
