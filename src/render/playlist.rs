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

//! Render the autoplay playlist.
//!
//! Lists the active tracks in play order, marking the track that is playing
//! and flagging tracks that have failed in the current playlist.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::{
    App,
    render::icons::{ICON_FAILED, ICON_PLAY},
};

pub(crate) fn draw_playlist(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let controller = &app.controller;
    let current = controller.now_playing().map(|t| &t.id);

    let items: Vec<ListItem> = controller
        .playlist()
        .iter()
        .map(|track| {
            let (marker, style) = if Some(&track.id) == current {
                (ICON_PLAY, Style::default().bold().fg(theme.accent_colour))
            } else if controller.is_failed(&track.id) {
                (ICON_FAILED, Style::default().fg(theme.failed_fg))
            } else {
                (" ", Style::default().fg(theme.table_name_fg))
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!(" {marker} "), style),
                Span::styled(
                    format!("{:>4}  ", track.order),
                    Style::default().fg(theme.table_order_fg),
                ),
                Span::styled(track.name.as_str(), style),
            ]))
        })
        .collect();

    let mut state = ListState::default().with_selected(
        current.and_then(|id| controller.playlist().iter().position(|t| &t.id == id)),
    );

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(
                    " Playlist ({} of {} playable) ",
                    controller.playlist().len().saturating_sub(controller.failed_count()),
                    controller.playlist().len()
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_colour)),
        )
        .highlight_style(Style::default().bg(theme.gauge_track_colour));

    f.render_stateful_widget(list, area, &mut state);
}
