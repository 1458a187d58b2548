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

//! Track store worker.
//!
//! This module offloads every database operation from the main UI thread. A
//! dedicated worker owns the SQLite connection, translates [`StoreTask`]
//! requests into store writes and broadcasts the results back to the
//! application via [`AppEvent`]s.
//!
//! # Subscription
//!
//! The worker is also the store's push channel. It sends the full ordered
//! track list ([`AppEvent::TracksChanged`]) and the active tracks
//! ([`AppEvent::PlaylistChanged`]):
//!
//! * once at start-up,
//! * after every write it performs,
//! * whenever another connection has written to the database file, detected
//!   by polling the SQLite data version while idle.
//!
//! Consumers always receive complete snapshots, never deltas.

mod handlers;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rusqlite::Connection;
use std::{
    sync::mpsc::{Receiver, RecvTimeoutError, Sender},
    thread,
};

use crate::{
    config::AppConfig,
    db,
    events::AppEvent,
    model::{Direction, TrackId},
};

#[derive(Debug)]
pub(crate) enum StoreTask {
    /// Registers a share link as a new active track. A missing order number
    /// means "after the last track", a missing name is generated from the
    /// order number.
    AddTrack {
        link: String,
        name: Option<String>,
        order: Option<i64>,
    },

    SetActive(TrackId, bool),

    DeleteTrack(TrackId),

    /// Swaps the track's order number with its neighbour in the full ordered
    /// list, a no-op at the edges.
    MoveTrack(TrackId, Direction),

    Refresh,
}

/// Spawns the background thread that owns the track store.
///
/// A failure to open the database, or the event channel closing, ends the
/// worker and is reported as a fatal application event.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_store_worker(
    config: &AppConfig,
    task_rx: Receiver<StoreTask>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        if let Err(e) = store_worker(&config, task_rx, &event_tx) {
            let _ = event_tx.send(AppEvent::FatalError(format!("Store worker failure: {e:?}")));
        }
    });
}

fn store_worker(
    config: &AppConfig,
    task_rx: Receiver<StoreTask>,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    let mut conn = db::init_db(&config.database_file)
        .with_context(|| format!("Failed to open database {}", config.database_file))?;

    info!("track store opened at {}", config.database_file);

    let mut ctx = TaskContext {
        event_tx,
        conn: &mut conn,
    };

    handlers::publish(&mut ctx)?;

    let mut version = db::data_version(ctx.conn)?;

    loop {
        match task_rx.recv_timeout(config.store_poll_interval()) {
            Ok(task) => {
                debug!("store task {task:?}");
                if let Err(e) = handle_task(task, &mut ctx) {
                    warn!("store task failed: {e:#}");
                    event_tx.send(AppEvent::Error(e.to_string()))?;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }

        // Our own writes leave the data version unchanged, only commits made
        // through other connections move it.
        let current = db::data_version(ctx.conn)?;
        if current != version {
            debug!("track store changed externally");
            version = current;
            handlers::publish(&mut ctx)?;
        }
    }
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
struct TaskContext<'a> {
    event_tx: &'a Sender<AppEvent>,
    conn: &'a mut Connection,
}

/// Orchestrates the execution of a single task.
fn handle_task(task: StoreTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        StoreTask::AddTrack { link, name, order } => handlers::add_track(ctx, &link, name, order),
        StoreTask::SetActive(id, active) => handlers::set_active(ctx, &id, active),
        StoreTask::DeleteTrack(id) => handlers::delete_track(ctx, &id),
        StoreTask::MoveTrack(id, direction) => handlers::move_track(ctx, &id, direction),
        StoreTask::Refresh => handlers::publish(ctx),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use super::*;
    use crate::{
        db::StoreError,
        model::{NewTrack, Track},
    };

    struct Fixture {
        conn: Connection,
        event_tx: Sender<AppEvent>,
        event_rx: Receiver<AppEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            let (event_tx, event_rx) = mpsc::channel();
            Self {
                conn: db::init_memory_db().unwrap(),
                event_tx,
                event_rx,
            }
        }

        fn run(&mut self, task: StoreTask) -> Result<()> {
            let mut ctx = TaskContext {
                event_tx: &self.event_tx,
                conn: &mut self.conn,
            };
            handle_task(task, &mut ctx)
        }

        fn insert(&self, name: &str, order: i64) -> TrackId {
            let track = NewTrack {
                name: name.to_string(),
                source_link: format!("https://host/{name}.mp3"),
                playback_link: format!("https://host/{name}.mp3?raw=1"),
                order,
            };
            db::insert_track(&self.conn, &track).unwrap()
        }

        fn events(&self) -> Vec<AppEvent> {
            self.event_rx.try_iter().collect()
        }

        fn tracks(&self) -> Vec<Track> {
            db::fetch_tracks(&self.conn).unwrap()
        }
    }

    fn add(link: &str, name: Option<&str>, order: Option<i64>) -> StoreTask {
        StoreTask::AddTrack {
            link: link.to_string(),
            name: name.map(str::to_string),
            order,
        }
    }

    fn names(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn add_track_defaults_order_and_name() {
        let mut fx = Fixture::new();
        fx.insert("first", 4);

        fx.run(add("https://www.dropbox.com/s/abc/song.mp3?dl=0", Some("  "), None))
            .unwrap();

        let added = fx.tracks().pop().unwrap();
        assert_eq!(added.order, 5);
        assert_eq!(added.name, "Track 005");
        assert!(added.active);
        assert_eq!(added.source_link, "https://www.dropbox.com/s/abc/song.mp3?dl=0");
        assert_eq!(
            added.playback_link,
            "https://www.dropbox.com/s/abc/song.mp3?dl=0&raw=1"
        );
    }

    #[test]
    fn add_track_keeps_given_name_and_order() {
        let mut fx = Fixture::new();

        fx.run(add("https://host/a.mp3", Some(" Opening "), Some(12)))
            .unwrap();

        let added = &fx.tracks()[0];
        assert_eq!(added.name, "Opening");
        assert_eq!(added.order, 12);
    }

    #[test]
    fn add_track_reports_and_publishes() {
        let mut fx = Fixture::new();

        fx.run(add("https://host/a.mp3", Some("Opening"), None))
            .unwrap();

        let events = fx.events();
        assert!(matches!(&events[0], AppEvent::Status(text) if text == "Track \"Opening\" added"));
        assert!(matches!(&events[1], AppEvent::TracksChanged(tracks) if tracks.len() == 1));
        assert!(matches!(&events[2], AppEvent::PlaylistChanged(tracks) if tracks.len() == 1));
    }

    #[test]
    fn add_track_requires_a_link() {
        let mut fx = Fixture::new();

        let err = fx.run(add("   ", None, None)).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::MissingLink)
        ));
        assert!(fx.tracks().is_empty());
    }

    #[test]
    fn add_track_rejects_links_that_are_not_web_urls() {
        let mut fx = Fixture::new();

        for link in ["not a link", "ftp://host/a.mp3", "file:///tmp/a.mp3"] {
            let err = fx.run(add(link, None, None)).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<StoreError>(),
                Some(StoreError::InvalidLink { .. })
            ));
        }
        assert!(fx.tracks().is_empty());
        assert!(fx.events().is_empty());
    }

    #[test]
    fn set_active_moves_track_out_of_the_playlist() {
        let mut fx = Fixture::new();
        let id = fx.insert("a", 1);
        fx.insert("b", 2);

        fx.run(StoreTask::SetActive(id, false)).unwrap();

        let events = fx.events();
        assert!(matches!(&events[0], AppEvent::TracksChanged(tracks) if tracks.len() == 2));
        assert!(
            matches!(&events[1], AppEvent::PlaylistChanged(tracks) if names(tracks) == ["b"])
        );
    }

    #[test]
    fn delete_track_removes_it() {
        let mut fx = Fixture::new();
        let id = fx.insert("a", 1);

        fx.run(StoreTask::DeleteTrack(id.clone())).unwrap();
        assert!(fx.tracks().is_empty());

        let err = fx.run(StoreTask::DeleteTrack(id)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn move_track_swaps_with_its_neighbour() {
        let mut fx = Fixture::new();
        let a = fx.insert("a", 1);
        let b = fx.insert("b", 2);
        fx.insert("c", 3);

        fx.run(StoreTask::MoveTrack(b, Direction::Up)).unwrap();
        assert_eq!(names(&fx.tracks()), ["b", "a", "c"]);

        fx.run(StoreTask::MoveTrack(a, Direction::Down)).unwrap();
        assert_eq!(names(&fx.tracks()), ["b", "c", "a"]);
    }

    #[test]
    fn move_track_at_the_edges_is_a_no_op() {
        let mut fx = Fixture::new();
        let a = fx.insert("a", 1);
        let b = fx.insert("b", 2);

        fx.run(StoreTask::MoveTrack(a, Direction::Up)).unwrap();
        fx.run(StoreTask::MoveTrack(b, Direction::Down)).unwrap();

        assert_eq!(names(&fx.tracks()), ["a", "b"]);
        assert!(fx.events().is_empty());
    }

    #[test]
    fn refresh_publishes_both_snapshots() {
        let mut fx = Fixture::new();
        fx.insert("a", 1);

        fx.run(StoreTask::Refresh).unwrap();

        let events = fx.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], AppEvent::TracksChanged(_)));
        assert!(matches!(&events[1], AppEvent::PlaylistChanged(_)));
    }
}
