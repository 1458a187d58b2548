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

use std::time::Instant;

use log::warn;

use crate::{
    App, MainView,
    model::Track,
    player::{SinkEvent, SinkId},
    playlist::{Notice, RetryTicket},
    preview::PREVIEW_FAILED,
};

pub(super) fn handle_tracks_changed(app: &mut App, tracks: Vec<Track>) {
    app.track_table.set_tracks(tracks);
}

pub(super) fn handle_playlist_changed(app: &mut App, tracks: Vec<Track>) {
    app.controller.list_updated(tracks);
}

pub(super) fn handle_sink_event(app: &mut App, sink_id: SinkId, event: SinkEvent) {
    match sink_id {
        SinkId::Playback => {
            match &event {
                SinkEvent::StateChanged(state) => app.player_state = *state,
                SinkEvent::Progress { position, duration } => {
                    app.player_time = Some(*position);
                    app.player_duration = *duration;
                }
                SinkEvent::Ended | SinkEvent::Error(_) => {
                    app.player_time = None;
                    app.player_duration = None;
                }
            }
            app.controller.on_sink_event(&event);
        }

        SinkId::Preview => {
            if let SinkEvent::Error(message) = &event {
                warn!("preview failed: {message}");
                app.status.error(PREVIEW_FAILED, Instant::now());
            }
            app.preview.on_sink_event(&event);
        }
    }
}

pub(super) fn handle_retry_elapsed(app: &mut App, ticket: RetryTicket) {
    app.controller.on_retry_elapsed(ticket);
}

pub(super) fn handle_notice(app: &mut App, notice: Notice) {
    app.status.error(notice.to_string(), Instant::now());
}

pub(super) fn handle_set_main_view(app: &mut App, main_view: MainView) {
    app.main_view = main_view;
}

pub(super) fn handle_status(app: &mut App, text: String) {
    app.status.info(text, Instant::now());
}

pub(super) fn handle_error(app: &mut App, text: String) {
    app.status.error(text, Instant::now());
}

pub(super) fn handle_tick(app: &mut App) {
    app.status.expire(Instant::now());
}
