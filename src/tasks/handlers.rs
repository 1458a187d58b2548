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

use anyhow::Result;
use log::{debug, info};
use url::Url;

use crate::{
    db::{self, StoreError},
    events::AppEvent,
    model::{Direction, NewTrack, TrackId, TrackUpdate},
    tasks::TaskContext,
    util::link::{generate_track_name, normalize_share_link},
};

pub(super) fn add_track(
    ctx: &mut TaskContext,
    link: &str,
    name: Option<String>,
    order: Option<i64>,
) -> Result<()> {
    let link = link.trim();
    validate_link(link)?;

    let order = match order {
        Some(order) => order,
        None => db::next_order(ctx.conn)?,
    };

    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| generate_track_name(order));

    let track = NewTrack {
        name,
        source_link: link.to_string(),
        playback_link: normalize_share_link(link),
        order,
    };

    let id = db::insert_track(ctx.conn, &track)?;
    info!("added track {id} \"{}\" at order {order}", track.name);

    ctx.event_tx
        .send(AppEvent::Status(format!("Track \"{}\" added", track.name)))?;

    publish(ctx)
}

pub(super) fn set_active(ctx: &mut TaskContext, id: &TrackId, active: bool) -> Result<()> {
    db::update_track(ctx.conn, id, &TrackUpdate::active(active))?;
    debug!("track {id} active={active}");

    publish(ctx)
}

pub(super) fn delete_track(ctx: &mut TaskContext, id: &TrackId) -> Result<()> {
    db::delete_track(ctx.conn, id)?;
    info!("deleted track {id}");

    publish(ctx)
}

pub(super) fn move_track(ctx: &mut TaskContext, id: &TrackId, direction: Direction) -> Result<()> {
    let tracks = db::fetch_tracks(ctx.conn)?;

    let idx = tracks
        .iter()
        .position(|t| &t.id == id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;

    let neighbour = match direction {
        Direction::Up => idx.checked_sub(1),
        Direction::Down => Some(idx + 1).filter(|&i| i < tracks.len()),
    };

    let Some(neighbour) = neighbour else {
        debug!("track {id} already at the edge, not moving {direction:?}");
        return Ok(());
    };

    db::swap_order(ctx.conn, id, &tracks[neighbour].id)?;

    publish(ctx)
}

/// Pushes the complete track list and the active playlist.
pub(super) fn publish(ctx: &mut TaskContext) -> Result<()> {
    let tracks = db::fetch_tracks(ctx.conn)?;
    let active = db::fetch_active_tracks(ctx.conn)?;

    ctx.event_tx.send(AppEvent::TracksChanged(tracks))?;
    ctx.event_tx.send(AppEvent::PlaylistChanged(active))?;

    Ok(())
}

fn validate_link(link: &str) -> Result<(), StoreError> {
    if link.is_empty() {
        return Err(StoreError::MissingLink);
    }

    let invalid = |reason: String| StoreError::InvalidLink {
        link: link.to_string(),
        reason,
    };

    let url = Url::parse(link).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(format!("unsupported scheme \"{scheme}\""))),
    }
}
