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

//! Audio output and the media sink abstraction.
//!
//! This module defines the [`MediaSink`] trait that the playlist controller
//! and the admin preview drive, and provides the [`AudioPlayer`]
//! implementation. The player manages a background worker thread that
//! interfaces with the underlying audio library (MPV), ensuring that audio
//! operations do not block the main application thread.

mod commands;

use std::sync::mpsc;

use anyhow::Result;
use thiserror::Error;

use crate::{events::AppEvent, player::commands::AudioPlayerCommand};

/// Represents the current playback status of the audio engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

/// Identifies which of the application's sinks an event came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SinkId {
    /// The autoplay output driven by the playlist controller.
    Playback,
    /// The admin console's preview output.
    Preview,
}

/// Lifecycle events emitted by a sink.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SinkEvent {
    StateChanged(PlayerState),
    /// Periodic time update, `duration` is `None` until the media reports it.
    Progress {
        position: f64,
        duration: Option<f64>,
    },
    /// The loaded media played to its end.
    Ended,
    /// The loaded media could not be opened or decoded.
    Error(String),
}

#[derive(Debug, Error)]
pub(crate) enum SinkError {
    #[error("audio worker is not running")]
    Disconnected,

    #[error("no source set")]
    NoSource,

    #[error("playback rejected: {0}")]
    Rejected(String),
}

/// An audio output that can be pointed at a URL and started or paused.
///
/// `play` returning an error is the synchronous failure path. Failures
/// discovered later, while opening or decoding the media, are reported as
/// [`SinkEvent::Error`].
pub(crate) trait MediaSink {
    fn set_source(&mut self, url: &str) -> Result<(), SinkError>;

    fn load(&mut self) -> Result<(), SinkError>;

    fn play(&mut self) -> Result<(), SinkError>;

    fn pause(&mut self) -> Result<(), SinkError>;

    fn seek_to(&mut self, seconds: f64) -> Result<(), SinkError>;
}

/// A handle to the audio playback engine.
///
/// This struct acts as a command proxy; it does not perform audio processing
/// itself but instead sends instructions to a background worker thread.
pub(crate) struct AudioPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<AudioPlayerCommand>,
    source: Option<String>,
    loaded: bool,
}

impl AudioPlayer {
    /// Spawns the audio worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send sink events (progress updates, end of
    ///   media, errors) back to the main event loop.
    /// * `sink_id` - The tag attached to every event from this player.
    pub(crate) fn new(event_tx: mpsc::Sender<AppEvent>, sink_id: SinkId) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<AudioPlayerCommand>();

        commands::spawn_player_worker(command_rx, event_tx, sink_id);

        Ok(Self {
            command_tx,
            source: None,
            loaded: false,
        })
    }

    // Maps internal audio backend flags to a simplified [`PlayerState`].
    fn player_state(is_paused: bool, is_idle: bool) -> PlayerState {
        if is_idle {
            PlayerState::Stopped
        } else if is_paused {
            PlayerState::Paused
        } else {
            PlayerState::Playing
        }
    }

    fn send(&self, command: AudioPlayerCommand) -> Result<(), SinkError> {
        self.command_tx
            .send(command)
            .map_err(|_| SinkError::Disconnected)
    }
}

impl MediaSink for AudioPlayer {
    fn set_source(&mut self, url: &str) -> Result<(), SinkError> {
        self.source = Some(url.to_string());
        self.loaded = false;
        Ok(())
    }

    fn load(&mut self) -> Result<(), SinkError> {
        let source = self.source.clone().ok_or(SinkError::NoSource)?;
        self.send(AudioPlayerCommand::Load(source))?;
        self.loaded = true;
        Ok(())
    }

    fn play(&mut self) -> Result<(), SinkError> {
        if !self.loaded {
            return Err(SinkError::Rejected("nothing loaded".to_string()));
        }
        self.send(AudioPlayerCommand::Play)
    }

    fn pause(&mut self) -> Result<(), SinkError> {
        self.send(AudioPlayerCommand::Pause)
    }

    fn seek_to(&mut self, seconds: f64) -> Result<(), SinkError> {
        self.send(AudioPlayerCommand::SeekTo(seconds))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A recording sink for exercising sink clients without an audio device.

    use std::{cell::RefCell, collections::HashSet, rc::Rc};

    use super::{MediaSink, SinkError};

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum SinkCall {
        SetSource(String),
        Load,
        Play,
        Pause,
        SeekTo(f64),
    }

    #[derive(Default)]
    struct Recording {
        calls: Vec<SinkCall>,
        source: Option<String>,
        rejected: HashSet<String>,
    }

    /// Clones share the same recording, so a test can keep one clone and
    /// hand the other to the code under test.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSink {
        inner: Rc<RefCell<Recording>>,
    }

    impl RecordingSink {
        /// Makes `play` fail whenever `url` is the current source.
        pub(crate) fn reject(&self, url: &str) {
            self.inner.borrow_mut().rejected.insert(url.to_string());
        }

        pub(crate) fn calls(&self) -> Vec<SinkCall> {
            self.inner.borrow().calls.clone()
        }

        pub(crate) fn clear(&self) {
            self.inner.borrow_mut().calls.clear();
        }

        /// The sources for which `play` was called, in call order.
        pub(crate) fn played(&self) -> Vec<String> {
            let recording = self.inner.borrow();
            let mut source = None;
            let mut played = Vec::new();
            for call in &recording.calls {
                match call {
                    SinkCall::SetSource(url) => source = Some(url.clone()),
                    SinkCall::Play => played.extend(source.clone()),
                    _ => {}
                }
            }
            played
        }
    }

    impl MediaSink for RecordingSink {
        fn set_source(&mut self, url: &str) -> Result<(), SinkError> {
            let mut recording = self.inner.borrow_mut();
            recording.calls.push(SinkCall::SetSource(url.to_string()));
            recording.source = Some(url.to_string());
            Ok(())
        }

        fn load(&mut self) -> Result<(), SinkError> {
            self.inner.borrow_mut().calls.push(SinkCall::Load);
            Ok(())
        }

        fn play(&mut self) -> Result<(), SinkError> {
            let mut recording = self.inner.borrow_mut();
            recording.calls.push(SinkCall::Play);
            match &recording.source {
                Some(url) if recording.rejected.contains(url) => {
                    Err(SinkError::Rejected(format!("cannot play {url}")))
                }
                Some(_) => Ok(()),
                None => Err(SinkError::NoSource),
            }
        }

        fn pause(&mut self) -> Result<(), SinkError> {
            self.inner.borrow_mut().calls.push(SinkCall::Pause);
            Ok(())
        }

        fn seek_to(&mut self, seconds: f64) -> Result<(), SinkError> {
            self.inner.borrow_mut().calls.push(SinkCall::SeekTo(seconds));
            Ok(())
        }
    }
}
