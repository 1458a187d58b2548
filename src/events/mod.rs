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

//! Application events and the main event loop.
//!
//! Every input the application reacts to arrives as an [`AppEvent`] on a
//! single channel and is handled on the main thread, one event at a time:
//!
//! * key presses and the periodic tick,
//! * snapshots pushed by the track store worker,
//! * sink events from the two audio workers,
//! * retry timers armed by the playlist controller.
//!
//! Handling events one at a time is what serialises the playlist
//! controller's transitions.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::{io::Stdout, sync::mpsc::Sender, thread, time::Duration};

use anyhow::{Result, anyhow};
use crossterm::event::KeyEvent;
use log::error;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App, MainView,
    model::Track,
    player::{SinkEvent, SinkId},
    playlist::{Notice, PlaybackDelegate, RetryTicket},
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    /// Every track record, in order.
    TracksChanged(Vec<Track>),
    /// The active tracks, in order.
    PlaylistChanged(Vec<Track>),

    Sink(SinkId, SinkEvent),
    RetryElapsed(RetryTicket),
    Notice(Notice),

    SetMainView(MainView),

    Tick,

    ExitApplication,

    /// Informational text for the status banner.
    Status(String),
    Error(String),
    FatalError(String),
}

/// Retry timers are sleeping threads that post the ticket back on the event
/// channel, so the retry itself runs on the main loop.
impl PlaybackDelegate for Sender<AppEvent> {
    fn schedule_retry(&self, ticket: RetryTicket, delay: Duration) {
        let event_tx = self.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = event_tx.send(AppEvent::RetryElapsed(ticket));
        });
    }

    fn on_notice(&self, notice: Notice) {
        let _ = self.send(AppEvent::Notice(notice));
    }
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed. A fatal error from a worker ends the loop with that error.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::FatalError(message) => {
                error!("{message}");
                return Err(anyhow!(message));
            }

            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::TracksChanged(tracks) => handle_tracks_changed(app, tracks),
            AppEvent::PlaylistChanged(tracks) => handle_playlist_changed(app, tracks),
            AppEvent::Sink(sink_id, sink_event) => handle_sink_event(app, sink_id, sink_event),
            AppEvent::RetryElapsed(ticket) => handle_retry_elapsed(app, ticket),
            AppEvent::Notice(notice) => handle_notice(app, notice),
            AppEvent::SetMainView(view) => handle_set_main_view(app, view),
            AppEvent::Status(text) => handle_status(app, text),
            AppEvent::Error(text) => handle_error(app, text),
            AppEvent::Tick => handle_tick(app),
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}
