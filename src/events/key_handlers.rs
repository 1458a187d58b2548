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

//! Keyboard routing.
//!
//! Keys go to the first interested receiver, in this order:
//!
//! 1. The delete confirmation prompt, when open, takes every key.
//! 2. The add-track form, when open, takes every key.
//! 3. The admin track table, in the admin view.
//! 4. Global keys (view switching, quit, opening the form).

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, warn};

use crate::{
    App, MainView,
    components::{TrackFormAction, TrackTableAction},
    events::AppEvent,
    preview::{PREVIEW_FAILED, PreviewOutcome},
    tasks::StoreTask,
};

/// Maps keyboard input to application actions and store tasks.
///
/// # Errors
///
/// Returns an error if a task or event fails to send, which only happens when
/// the receiving side has gone away.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if let Some(track) = app.pending_delete.take() {
        if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            app.task_tx.send(StoreTask::DeleteTrack(track.id))?;
        } else {
            debug!("delete of {} cancelled", track.name);
        }
        return Ok(());
    }

    let event = Event::Key(key);

    if app.track_form.is_active() {
        if let Some(action) = app.track_form.process_event(&event) {
            process_form_action(app, action)?;
        }
        return Ok(());
    }

    if app.main_view == MainView::Admin {
        if let Some(action) = app.track_table.process_event(&event) {
            return process_table_action(app, action);
        }
    }

    process_global_key_event(app, key)
}

fn process_form_action(app: &mut App, action: TrackFormAction) -> Result<()> {
    match action {
        TrackFormAction::Submit(request) => app.task_tx.send(StoreTask::AddTrack {
            link: request.link,
            name: request.name,
            order: request.order,
        })?,
        TrackFormAction::Invalid(message) => app.status.error(message, Instant::now()),
        TrackFormAction::Cancelled => {}
    }

    Ok(())
}

fn process_table_action(app: &mut App, action: TrackTableAction) -> Result<()> {
    match action {
        TrackTableAction::Move(id, direction) => {
            app.task_tx.send(StoreTask::MoveTrack(id, direction))?
        }
        TrackTableAction::SetActive(id, active) => {
            app.task_tx.send(StoreTask::SetActive(id, active))?
        }
        TrackTableAction::Preview(link) => match app.preview.toggle(&link) {
            Ok(PreviewOutcome::Started) => debug!("previewing {link}"),
            Ok(PreviewOutcome::Paused) => debug!("preview paused"),
            Err(e) => {
                warn!("preview of {link} failed: {e}");
                app.status.error(PREVIEW_FAILED, Instant::now());
            }
        },
        TrackTableAction::Delete(track) => app.pending_delete = Some(track),
    }

    Ok(())
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('1') => app.event_tx.send(AppEvent::SetMainView(MainView::Admin))?,
        KeyCode::Char('2') => app.event_tx.send(AppEvent::SetMainView(MainView::Player))?,

        KeyCode::Char('a') if app.main_view == MainView::Admin => app.track_form.open(),

        KeyCode::Char('r') => app.task_tx.send(StoreTask::Refresh)?,

        _ => {}
    }

    Ok(())
}
