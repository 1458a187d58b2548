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

//! Autoplay playlist sequencing.
//!
//! The [`PlaylistController`] plays the active tracks in order, one at a
//! time, on a single [`MediaSink`]. It reacts to three kinds of input:
//!
//! * **List updates** pushed by the track store, always the full ordered list
//!   of active tracks.
//! * **Sink events**: end of media, media errors and progress.
//! * **Retry timers** armed by the controller itself before each advance.
//!
//! # Failures
//!
//! A track that fails once, either because the sink rejects `play` or
//! because the sink reports a media error, is skipped for the rest of the
//! current list generation. Every list update starts a new generation with
//! no failures. When every track of the generation has failed, playback
//! stops and a [`Notice::NoValidTrack`] is raised.
//!
//! # States
//!
//! ```text
//!           list (empty)                    play ok
//!  Empty <-------------- any        Idle ------------> Playing
//!    |                               ^                  |   ^
//!    | list (non-empty)              | all failed       |   | play ok
//!    v                               |                  v   |
//!  attempt-play ---------------------+------------> Advancing
//!                     play rejected / skip      (retry after delay)
//! ```

use std::{collections::HashSet, fmt, time::Duration};

use log::{debug, info, warn};

use crate::{
    model::{Track, TrackId},
    player::{MediaSink, SinkError, SinkEvent},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlaybackState {
    /// No active tracks.
    Empty,
    /// Tracks exist but nothing is playing, either not yet started or every
    /// track has failed.
    Idle,
    /// A track is loaded and play has been requested.
    Playing,
    /// Between a track ending or failing and the next play attempt.
    Advancing,
}

/// Identifies one scheduled play attempt.
///
/// Only the most recently issued ticket is honoured, which is how a pending
/// retry is cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RetryTicket(u64);

/// User-facing notices raised by the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Notice {
    NoValidTrack,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoValidTrack => f.write_str("No valid track available."),
        }
    }
}

/// Outward effects of the controller that the host carries out.
pub(crate) trait PlaybackDelegate {
    /// Arrange for [`PlaylistController::on_retry_elapsed`] to be called with
    /// `ticket` once `delay` has passed.
    fn schedule_retry(&self, ticket: RetryTicket, delay: Duration);

    fn on_notice(&self, notice: Notice);
}

pub(crate) struct PlaylistController<S, D> {
    sink: S,
    delegate: D,
    retry_delay: Duration,

    playlist: Vec<Track>,
    position: usize,
    failed: HashSet<TrackId>,
    intent: bool,
    state: PlaybackState,

    /// The last track an attempt was made on, used to locate the next
    /// position after the list has been replaced.
    anchor: Option<TrackId>,
    now_playing: Option<Track>,
    progress: Option<f64>,

    pending_retry: Option<RetryTicket>,
    next_ticket: u64,
}

impl<S: MediaSink, D: PlaybackDelegate> PlaylistController<S, D> {
    pub(crate) fn new(sink: S, delegate: D, retry_delay: Duration) -> Self {
        Self {
            sink,
            delegate,
            retry_delay,
            playlist: Vec::new(),
            position: 0,
            failed: HashSet::new(),
            intent: false,
            state: PlaybackState::Empty,
            anchor: None,
            now_playing: None,
            progress: None,
            pending_retry: None,
            next_ticket: 0,
        }
    }

    pub(crate) fn state(&self) -> PlaybackState {
        self.state
    }

    pub(crate) fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    #[cfg(test)]
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Whether playback should be running, as opposed to stopped by policy.
    pub(crate) fn intent(&self) -> bool {
        self.intent
    }

    pub(crate) fn is_failed(&self, id: &TrackId) -> bool {
        self.failed.contains(id)
    }

    pub(crate) fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// The track currently playing, which may no longer be in the playlist.
    pub(crate) fn now_playing(&self) -> Option<&Track> {
        self.now_playing.as_ref()
    }

    /// Completion of the current track as a percentage, `None` until a
    /// usable duration is known.
    pub(crate) fn progress(&self) -> Option<f64> {
        self.progress
    }

    /// Replaces the playlist with a fresh list from the store.
    ///
    /// The failure set is cleared unconditionally. An empty list stops
    /// playback. A non-empty list starts playback from the first track unless
    /// a track is already playing or about to be. A playing track runs on and
    /// the new list takes effect at the next advance. A pending attempt is
    /// moved to the track after the last attempted one in the new list.
    pub(crate) fn list_updated(&mut self, tracks: Vec<Track>) {
        debug!("playlist updated with {} tracks", tracks.len());

        self.playlist = tracks;
        self.failed.clear();

        if self.playlist.is_empty() {
            self.enter_empty();
            return;
        }

        match self.state {
            PlaybackState::Playing => {}
            // The pending attempt follows the anchor in the new list.
            PlaybackState::Advancing => self.position = self.next_position(),
            PlaybackState::Empty | PlaybackState::Idle => {
                self.position = 0;
                self.anchor = None;
                self.attempt_play();
            }
        }
    }

    /// Runs the scheduled play attempt for `ticket`, if it is still current.
    pub(crate) fn on_retry_elapsed(&mut self, ticket: RetryTicket) {
        if self.pending_retry != Some(ticket) {
            debug!("ignoring stale retry {ticket:?}");
            return;
        }

        self.attempt_play();
    }

    pub(crate) fn on_sink_event(&mut self, event: &SinkEvent) {
        match event {
            SinkEvent::Ended => self.on_ended(),
            SinkEvent::Error(message) => self.on_error(message),
            SinkEvent::Progress { position, duration } => self.on_progress(*position, *duration),
            SinkEvent::StateChanged(_) => {}
        }
    }

    fn on_ended(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }

        self.advance();
    }

    fn on_error(&mut self, message: &str) {
        if self.state != PlaybackState::Playing {
            debug!("ignoring sink error outside playback: {message}");
            return;
        }

        if let Some(track) = self.now_playing.take() {
            warn!("media error on {}: {message}", track.name);
            // A track dropped from the list since it started has nothing to
            // mark, the failure set only holds listed tracks.
            if self.playlist.iter().any(|t| t.id == track.id) {
                self.failed.insert(track.id);
            }
        }

        self.advance();
    }

    /// Recomputes the completion percentage, keeping the previous value when
    /// the duration is unknown or zero.
    fn on_progress(&mut self, position: f64, duration: Option<f64>) {
        let Some(duration) = duration.filter(|d| d.is_finite() && *d > 0.0) else {
            return;
        };

        self.progress = Some((position / duration * 100.0).clamp(0.0, 100.0));
    }

    fn attempt_play(&mut self) {
        self.pending_retry = None;

        let len = self.playlist.len();
        if len == 0 {
            self.enter_empty();
            return;
        }

        // The list may have shrunk while a retry was pending.
        if self.position >= len {
            self.position = 0;
        }

        if self.failed.len() >= len {
            info!("all {len} tracks failed, stopping playback");
            self.stop_sink();
            self.intent = false;
            self.state = PlaybackState::Idle;
            self.now_playing = None;
            self.delegate.on_notice(Notice::NoValidTrack);
            return;
        }

        let track = self.playlist[self.position].clone();
        self.anchor = Some(track.id.clone());

        if self.failed.contains(&track.id) {
            debug!("skipping failed track {}", track.name);
            self.advance();
            return;
        }

        self.progress = None;

        match self.start(&track.playback_link) {
            Ok(()) => {
                info!("playing {}", track.name);
                self.intent = true;
                self.state = PlaybackState::Playing;
                self.now_playing = Some(track);
            }
            Err(e) => {
                warn!("failed to play {}: {e}", track.name);
                self.failed.insert(track.id);
                self.now_playing = None;
                self.advance();
            }
        }
    }

    fn start(&mut self, url: &str) -> Result<(), SinkError> {
        self.sink.set_source(url)?;
        self.sink.load()?;
        self.sink.play()
    }

    fn advance(&mut self) {
        if self.playlist.is_empty() {
            self.enter_empty();
            return;
        }

        self.position = self.next_position();
        self.state = PlaybackState::Advancing;

        let ticket = RetryTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_retry = Some(ticket);

        self.delegate.schedule_retry(ticket, self.retry_delay);
    }

    /// The position after the anchor track in the current list, wrapping
    /// around. When the anchor is no longer listed, playback resumes from the
    /// start of the list.
    fn next_position(&self) -> usize {
        let len = self.playlist.len();

        match &self.anchor {
            Some(id) => self
                .playlist
                .iter()
                .position(|t| &t.id == id)
                .map_or(0, |i| (i + 1) % len),
            None => (self.position + 1) % len,
        }
    }

    fn enter_empty(&mut self) {
        self.stop_sink();
        self.intent = false;
        self.state = PlaybackState::Empty;
        self.position = 0;
        self.anchor = None;
        self.now_playing = None;
        self.progress = None;
        self.pending_retry = None;
    }

    fn stop_sink(&mut self) {
        if let Err(e) = self.sink.pause() {
            warn!("failed to stop playback: {e}");
        }
    }
}
