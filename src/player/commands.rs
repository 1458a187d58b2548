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

//! MPV-backed audio playback engine and event processing.
//!
//! This module bridges the application's command-based sink interface and
//! the MPV property observation system, on a dedicated worker thread.
//!
//! # Architecture
//!
//! The engine operates using a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`AudioPlayerCommand`]s from the
//!    [`AudioPlayer`] proxy (load, play, pause, seek).
//! 2. **Event Channel**: Broadcasts [`SinkEvent`]s, tagged with the sink's
//!    [`SinkId`], to notify the application of progress, end of media and
//!    media errors.

use anyhow::{Context, Result};
use log::{debug, warn};
use mpv::Format;
use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use crate::{
    events::AppEvent,
    player::{AudioPlayer, PlayerState, SinkEvent, SinkId},
};

#[derive(Debug)]
pub(crate) enum AudioPlayerCommand {
    /// Open the URL, replacing any current media, without starting it.
    Load(String),
    Play,
    Pause,
    SeekTo(f64),
}

/// Playback flags tracked between MPV events.
struct EngineState {
    is_paused: bool,
    is_idle: bool,
    player_state: PlayerState,
    duration: Option<f64>,
}

/// Spawns the audio worker thread to process playback commands.
///
/// If the internal worker returns an error, it is caught here and broadcast as
/// a fatal application event.
///
/// # Arguments
///
/// * `command_rx` - The receiving end of the player command channel.
/// * `event_tx` - The channel used to broadcast playback updates and errors.
/// * `sink_id` - The tag attached to every event sent by this worker.
pub(crate) fn spawn_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
    sink_id: SinkId,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = audio_player_worker(command_rx, event_tx, sink_id) {
            let _ = error_tx.send(AppEvent::FatalError(format!(
                "MPV worker failure ({sink_id:?}): {e:?}"
            )));
        }
    });
}

/// The primary execution loop for the audio player backend.
///
/// This function initializes a local `libmpv` context and alternates between
/// draining incoming commands and waiting briefly for MPV events.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize or the event
/// channel is closed.
fn audio_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
    sink_id: SinkId,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<bool>("pause", 0)
        .context("Failed to observe pause")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<bool>("idle-active", 0)
        .context("Failed to observe idle-active")?;

    let mut state = EngineState {
        is_paused: false,
        is_idle: true,
        player_state: PlayerState::Stopped,
        duration: None,
    };

    let send = |event: SinkEvent| {
        event_tx
            .send(AppEvent::Sink(sink_id, event))
            .context("Failed to send sink event")
    };

    loop {
        process_commands(&mut handler, &command_rx, &mut state, &send)?;
        process_mpv_events(&mut handler, &mut state, &send)?;
    }
}

/// Drains and executes all pending commands from the proxy.
///
/// A failed load is reported as a media error for the controller to act on.
/// Other command failures (seeking before the media is open, for example)
/// are logged and otherwise ignored.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &mpsc::Receiver<AudioPlayerCommand>,
    state: &mut EngineState,
    send: &impl Fn(SinkEvent) -> Result<()>,
) -> Result<()> {
    while let Ok(command) = command_rx.try_recv() {
        match command {
            AudioPlayerCommand::Load(url) => {
                debug!("loading {url}");
                state.duration = None;
                let loaded = handler
                    .set_property("pause", true)
                    .and_then(|_| handler.command(&["loadfile", &url, "replace"]));
                if let Err(e) = loaded {
                    send(SinkEvent::Error(format!("failed to load {url}: {e:?}")))?;
                }
            }
            AudioPlayerCommand::Play => {
                if let Err(e) = handler.set_property("pause", false) {
                    warn!("failed to start playback: {e:?}");
                }
            }
            AudioPlayerCommand::Pause => {
                if let Err(e) = handler.set_property("pause", true) {
                    warn!("failed to pause playback: {e:?}");
                }
            }
            AudioPlayerCommand::SeekTo(seconds) => {
                if let Err(e) = handler.command(&["seek", &seconds.to_string(), "absolute"]) {
                    debug!("seek to {seconds} ignored: {e:?}");
                }
            }
        }
    }

    Ok(())
}

/// Polls for MPV events and synchronizes the sink state.
///
/// This function waits for up to 50ms for an event from the MPV context.
/// If an event occurs, it updates the tracked flags and sends any resulting
/// [`SinkEvent`]s.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    state: &mut EngineState,
    send: &impl Fn(SinkEvent) -> Result<()>,
) -> Result<()> {
    if let Some(mpv_event) = handler.wait_event(0.05) {
        let sink_event = match mpv_event {
            mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
                ("duration", Format::Double(duration)) => {
                    state.duration = Some(duration);
                    None
                }
                ("pause", Format::Flag(pause)) => {
                    state.is_paused = pause;
                    None
                }
                ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                    Some(SinkEvent::Progress {
                        position: seconds,
                        duration: state.duration,
                    })
                }
                ("idle-active", Format::Flag(idle_active)) => {
                    state.is_idle = idle_active;
                    None
                }
                _ => None,
            },
            mpv::Event::EndFile(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF)) => {
                Some(SinkEvent::Ended)
            }
            mpv::Event::EndFile(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR)) => {
                Some(SinkEvent::Error("media could not be played".to_string()))
            }
            mpv::Event::EndFile(Err(e)) => Some(SinkEvent::Error(format!("{e:?}"))),
            _ => None,
        };

        let new_player_state = AudioPlayer::player_state(state.is_paused, state.is_idle);

        if new_player_state != state.player_state {
            state.player_state = new_player_state;
            send(SinkEvent::StateChanged(new_player_state))?;
        }

        if let Some(event) = sink_event {
            send(event)?;
        }
    }

    Ok(())
}
