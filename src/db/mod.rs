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

//! Data access layer.
//!
//! This module handles all interactions with the SQLite database that holds
//! the track collection: schema creation, ordered queries, record writes and
//! the all-or-nothing order swap used to reorder tracks.
//!
//! # Tables
//!
//! * `tracks` - One row per track record, with its links, its order number
//!   and its active flag.
//!
//! # Change detection
//!
//! Writes made through another connection (for example a second instance of
//! the application sharing the database file) are detected by polling
//! [`data_version`].

mod error;
mod model;

use rusqlite::{Connection, OptionalExtension, ToSql, TransactionBehavior, params};

pub(crate) use error::{Result, StoreError};

use crate::model::{NewTrack, Track, TrackId, TrackUpdate};

const TRACK_COLUMNS: &str =
    "id, name, source_link, playback_link, track_order, active, created_at";

/// Opens a connection to the SQLite database and configures it.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging so that a reader in another
///   process does not block the writer.
/// * **Performance Tuning**: Sets synchronous mode to `NORMAL`.
/// * **Schema**: Executes [`create_schema`] to ensure the table and index
///   exist.
///
/// # Arguments
///
/// * `path` - The file system path to the SQLite database file.
///
/// # Errors
///
/// Returns an error if:
/// * The database file cannot be opened.
/// * The initial PRAGMA configurations fail.
/// * The schema initialization fails.
pub(crate) fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        return Err(StoreError::JournalMode(journal_mode));
    }

    conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

    conn.set_prepared_statement_cache_capacity(32);

    create_schema(&conn)?;

    Ok(conn)
}

/// Opens a private in-memory database with the schema applied.
#[cfg(test)]
pub(crate) fn init_memory_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Create the database schema.
///
/// The index on `(active, track_order)` serves the ordered active-only query
/// that feeds the playlist.
///
/// This operation is wrapped in a single SQL transaction to ensure the schema
/// is updated atomically.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS tracks (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            source_link TEXT NOT NULL,
            playback_link TEXT NOT NULL,
            track_order INTEGER NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tracks_active_order ON tracks (active, track_order);

        COMMIT;",
    )?;

    Ok(())
}

/// Fetches every track record, active or not, in playback order.
///
/// Ties on the order number are broken by creation time and then insertion
/// order so that the result is stable between calls.
///
/// # Errors
///
/// Returns an error if the SQL query fails or if a row cannot be mapped to a
/// [`Track`].
pub(crate) fn fetch_tracks(conn: &Connection) -> Result<Vec<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM tracks ORDER BY track_order, created_at, rowid"
    );

    let mut stmt = conn.prepare_cached(&sql)?;
    let results = stmt
        .query_map([], Track::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(results)
}

/// Fetches the active track records in playback order.
///
/// This is the list the playlist controller consumes.
///
/// # Errors
///
/// Returns an error if the SQL query fails or if a row cannot be mapped to a
/// [`Track`].
pub(crate) fn fetch_active_tracks(conn: &Connection) -> Result<Vec<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM tracks WHERE active = 1 ORDER BY track_order, created_at, rowid"
    );

    let mut stmt = conn.prepare_cached(&sql)?;
    let results = stmt
        .query_map([], Track::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(results)
}

/// Returns the order number following the highest one in the collection, or
/// `1` when the collection is empty.
pub(crate) fn next_order(conn: &Connection) -> Result<i64> {
    let mut stmt = conn.prepare_cached("SELECT COALESCE(MAX(track_order), 0) + 1 FROM tracks")?;
    let order = stmt.query_row([], |r| r.get(0))?;

    Ok(order)
}

/// Inserts a new, active, track record and returns its generated identifier.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub(crate) fn insert_track(conn: &Connection, track: &NewTrack) -> Result<TrackId> {
    let id = TrackId::generate();

    let sql = "
        INSERT INTO tracks (id, name, source_link, playback_link, track_order, active, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, 1, CAST(strftime('%s', 'now') AS INTEGER))";

    let mut stmt = conn.prepare_cached(sql)?;
    stmt.execute(params![
        id,
        track.name,
        track.source_link,
        track.playback_link,
        track.order
    ])?;

    Ok(id)
}

/// Writes the fields set in `update` to the record with the given id.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if no record has the given id, or an
/// SQLite error if the update fails.
pub(crate) fn update_track(conn: &Connection, id: &TrackId, update: &TrackUpdate) -> Result<()> {
    apply_update(conn, id, update)
}

/// Deletes the record with the given id.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if no record has the given id.
pub(crate) fn delete_track(conn: &Connection, id: &TrackId) -> Result<()> {
    let mut stmt = conn.prepare_cached("DELETE FROM tracks WHERE id = ?")?;
    let deleted = stmt.execute([id])?;

    if deleted == 0 {
        return Err(StoreError::NotFound(id.clone()));
    }

    Ok(())
}

/// Exchanges the order numbers of two records atomically.
///
/// The current order numbers are read inside the same transaction that
/// writes them, so a concurrent writer cannot interleave.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if either record is missing, or an
/// SQLite error if either write fails. In both cases neither record changes.
pub(crate) fn swap_order(conn: &mut Connection, a: &TrackId, b: &TrackId) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let order_a = fetch_order(&tx, a)?;
    let order_b = fetch_order(&tx, b)?;

    apply_update(&tx, a, &TrackUpdate::order(order_b))?;
    apply_update(&tx, b, &TrackUpdate::order(order_a))?;

    tx.commit()?;

    Ok(())
}

/// Returns the SQLite data version of the connection.
///
/// The value changes whenever another connection commits a write to the
/// database, writes made through `conn` itself leave it unchanged.
pub(crate) fn data_version(conn: &Connection) -> Result<i64> {
    let version = conn.query_row("PRAGMA data_version", [], |r| r.get(0))?;

    Ok(version)
}

fn fetch_order(conn: &Connection, id: &TrackId) -> Result<i64> {
    let mut stmt = conn.prepare_cached("SELECT track_order FROM tracks WHERE id = ?")?;

    stmt.query_row([id], |r| r.get(0))
        .optional()?
        .ok_or_else(|| StoreError::NotFound(id.clone()))
}

fn apply_update(conn: &Connection, id: &TrackId, update: &TrackUpdate) -> Result<()> {
    if update.is_empty() {
        let mut stmt = conn.prepare_cached("SELECT EXISTS (SELECT 1 FROM tracks WHERE id = ?)")?;
        let exists: bool = stmt.query_row([id], |r| r.get(0))?;

        return if exists {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.clone()))
        };
    }

    let mut assignments = Vec::new();
    let mut params: Vec<&dyn ToSql> = Vec::new();

    if let Some(name) = &update.name {
        assignments.push("name = ?");
        params.push(name);
    }

    if let Some(order) = &update.order {
        assignments.push("track_order = ?");
        params.push(order);
    }

    if let Some(active) = &update.active {
        assignments.push("active = ?");
        params.push(active);
    }

    params.push(id);

    let sql = format!("UPDATE tracks SET {} WHERE id = ?", assignments.join(", "));

    let mut stmt = conn.prepare_cached(&sql)?;
    let updated = stmt.execute(&params[..])?;

    if updated == 0 {
        return Err(StoreError::NotFound(id.clone()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_track(name: &str, order: i64) -> NewTrack {
        NewTrack {
            name: name.to_string(),
            source_link: format!("https://www.dropbox.com/s/abc/{name}.mp3?dl=0"),
            playback_link: format!("https://www.dropbox.com/s/abc/{name}.mp3?dl=0&raw=1"),
            order,
        }
    }

    fn names(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn fetch_tracks_is_ordered_by_order_number() {
        let conn = init_memory_db().unwrap();
        insert_track(&conn, &new_track("c", 3)).unwrap();
        insert_track(&conn, &new_track("a", 1)).unwrap();
        insert_track(&conn, &new_track("b", 2)).unwrap();

        let tracks = fetch_tracks(&conn).unwrap();

        assert_eq!(names(&tracks), ["a", "b", "c"]);
        assert!(tracks.iter().all(|t| t.active));
    }

    #[test]
    fn equal_order_numbers_keep_insertion_order() {
        let conn = init_memory_db().unwrap();
        insert_track(&conn, &new_track("first", 1)).unwrap();
        insert_track(&conn, &new_track("second", 1)).unwrap();

        let tracks = fetch_tracks(&conn).unwrap();

        assert_eq!(names(&tracks), ["first", "second"]);
    }

    #[test]
    fn fetch_active_tracks_skips_inactive_records() {
        let conn = init_memory_db().unwrap();
        insert_track(&conn, &new_track("a", 1)).unwrap();
        let b = insert_track(&conn, &new_track("b", 2)).unwrap();
        insert_track(&conn, &new_track("c", 3)).unwrap();

        update_track(&conn, &b, &TrackUpdate::active(false)).unwrap();

        assert_eq!(names(&fetch_active_tracks(&conn).unwrap()), ["a", "c"]);
        assert_eq!(fetch_tracks(&conn).unwrap().len(), 3);
    }

    #[test]
    fn next_order_follows_the_highest_order() {
        let conn = init_memory_db().unwrap();
        assert_eq!(next_order(&conn).unwrap(), 1);

        insert_track(&conn, &new_track("a", 7)).unwrap();
        insert_track(&conn, &new_track("b", 2)).unwrap();

        assert_eq!(next_order(&conn).unwrap(), 8);
    }

    #[test]
    fn update_writes_only_the_given_fields() {
        let conn = init_memory_db().unwrap();
        let id = insert_track(&conn, &new_track("a", 1)).unwrap();

        let update = TrackUpdate {
            name: Some("renamed".to_string()),
            ..TrackUpdate::default()
        };
        update_track(&conn, &id, &update).unwrap();

        let track = &fetch_tracks(&conn).unwrap()[0];
        assert_eq!(track.name, "renamed");
        assert_eq!(track.order, 1);
        assert!(track.active);
    }

    #[test]
    fn update_and_delete_of_missing_record_are_not_found() {
        let conn = init_memory_db().unwrap();
        let missing = TrackId::from("missing");

        let update = update_track(&conn, &missing, &TrackUpdate::active(false));
        assert!(matches!(update, Err(StoreError::NotFound(id)) if id == missing));

        let empty = update_track(&conn, &missing, &TrackUpdate::default());
        assert!(matches!(empty, Err(StoreError::NotFound(_))));

        assert!(matches!(
            delete_track(&conn, &missing),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn delete_removes_the_record() {
        let conn = init_memory_db().unwrap();
        let a = insert_track(&conn, &new_track("a", 1)).unwrap();
        insert_track(&conn, &new_track("b", 2)).unwrap();

        delete_track(&conn, &a).unwrap();

        assert_eq!(names(&fetch_tracks(&conn).unwrap()), ["b"]);
    }

    #[test]
    fn swap_order_exchanges_order_numbers() {
        let mut conn = init_memory_db().unwrap();
        let a = insert_track(&conn, &new_track("a", 3)).unwrap();
        let b = insert_track(&conn, &new_track("b", 4)).unwrap();

        swap_order(&mut conn, &a, &b).unwrap();

        let tracks = fetch_tracks(&conn).unwrap();
        assert_eq!(names(&tracks), ["b", "a"]);
        assert_eq!(tracks[0].order, 3);
        assert_eq!(tracks[1].order, 4);
    }

    #[test]
    fn swap_order_persists_neither_write_when_one_fails() {
        let mut conn = init_memory_db().unwrap();
        let a = insert_track(&conn, &new_track("a", 3)).unwrap();
        let b = insert_track(&conn, &new_track("b", 4)).unwrap();

        // Reject any write to `b`, after `a` has already been updated.
        conn.execute_batch(&format!(
            "CREATE TRIGGER reject_b BEFORE UPDATE ON tracks WHEN OLD.id = '{b}'
             BEGIN SELECT RAISE(ABORT, 'simulated write failure'); END;"
        ))
        .unwrap();

        let result = swap_order(&mut conn, &a, &b);
        assert!(matches!(result, Err(StoreError::Sqlite(_))));

        let tracks = fetch_tracks(&conn).unwrap();
        assert_eq!(tracks[0].id, a);
        assert_eq!(tracks[0].order, 3);
        assert_eq!(tracks[1].id, b);
        assert_eq!(tracks[1].order, 4);
    }

    #[test]
    fn swap_order_with_missing_record_changes_nothing() {
        let mut conn = init_memory_db().unwrap();
        let a = insert_track(&conn, &new_track("a", 1)).unwrap();
        let missing = TrackId::from("missing");

        let result = swap_order(&mut conn, &a, &missing);

        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == missing));
        assert_eq!(fetch_tracks(&conn).unwrap()[0].order, 1);
    }

    #[test]
    fn data_version_changes_on_writes_from_other_connections() {
        let dir = std::env::temp_dir().join(format!("trackdeck-test-{}", TrackId::generate()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tracks.db");
        let path = path.to_str().unwrap();

        let reader = init_db(path).unwrap();
        let writer = init_db(path).unwrap();

        let before = data_version(&reader).unwrap();
        insert_track(&writer, &new_track("a", 1)).unwrap();
        let after = data_version(&reader).unwrap();

        assert_ne!(before, after);

        drop(reader);
        drop(writer);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
