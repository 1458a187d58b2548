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

//! Render the now playing panel.
//!
//! This module renders the current track, elapsed and total time, and the
//! progress gauge driven by the playlist controller.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    player::PlayerState,
    playlist::PlaybackState,
    render::icons::{ICON_PAUSE, ICON_PLAY, ICON_STOP},
    util,
};

/// Renders the player widget.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(20)])
        .split(chunks[0]);

    let bold = Style::default().add_modifier(Modifier::BOLD);

    match app.controller.now_playing() {
        Some(track) => {
            let icon = match app.player_state {
                PlayerState::Playing => ICON_PLAY,
                PlayerState::Paused => ICON_PAUSE,
                PlayerState::Stopped => ICON_STOP,
            };

            let track_line = Line::from(vec![
                Span::styled(format!(" {icon} "), bold).fg(Color::White),
                Span::styled(track.name.as_str(), bold).fg(app.theme.accent_colour),
            ]);
            f.render_widget(Paragraph::new(track_line), info_chunks[0]);

            let time = app.player_time.unwrap_or(0.0);
            let time_line = Line::from(vec![
                Span::styled(util::format::format_time(time), bold).fg(app.theme.accent_colour),
                Span::styled(" / ", bold).fg(Color::White),
                Span::styled(
                    app.player_duration
                        .map_or_else(|| "--:--".to_string(), util::format::format_time),
                    bold,
                )
                .fg(app.theme.accent_colour),
            ]);
            f.render_widget(
                Paragraph::new(time_line).alignment(Alignment::Right),
                info_chunks[1],
            );
        }
        None => {
            let idle = match app.controller.state() {
                PlaybackState::Empty => "No active tracks",
                PlaybackState::Advancing => "Loading next track...",
                _ if !app.controller.intent() => "Playback stopped",
                PlaybackState::Idle | PlaybackState::Playing => "Nothing playing",
            };
            f.render_widget(
                Paragraph::new(format!(" {ICON_STOP} {idle}")).fg(app.theme.border_colour),
                info_chunks[0],
            );
        }
    }

    let ratio = app.controller.progress().unwrap_or(0.0) / 100.0;

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio(ratio.clamp(0.0, 1.0))
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[2]);
}
