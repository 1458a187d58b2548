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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every processed event to provide a reactive user interface.

pub(crate) mod icons;
mod player;
mod playlist;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::{
    App, MainView,
    components::StatusKind,
    model::Track,
    render::{player::draw_player, playlist::draw_playlist},
    theme::Theme,
};

/// Renders the user interface to the terminal frame.
///
/// The screen is split into a view selector, the main view, the now playing
/// panel and a footer holding either the status banner or key help.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: header, main, player, footer
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, outer[0], app);

    match app.main_view {
        MainView::Admin => {
            app.track_table
                .draw(f, outer[1], &app.theme, app.preview.playing_link());

            if app.track_form.is_active() {
                app.track_form.draw(f, outer[1], &app.theme);
            }

            if let Some(track) = &app.pending_delete {
                draw_confirm_delete(f, outer[1], track, &app.theme);
            }
        }
        MainView::Player => draw_playlist(f, outer[1], app),
    }

    draw_player(f, outer[2], app);

    draw_footer(f, outer[3], app);
}

/// A rectangle `height` rows high and `percent_x` of the width, centred in
/// `area`.
pub(crate) fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let tab = |key: &str, label: &str, view: MainView| {
        let style = if app.main_view == view {
            Style::default().bold().fg(app.theme.accent_colour)
        } else {
            Style::default().fg(app.theme.border_colour)
        };
        Span::styled(format!(" {key} {label} "), style)
    };

    let tracks = app.track_table.tracks();
    let active = tracks.iter().filter(|t| t.active).count();

    let header = Line::from(vec![
        tab("1", "Admin", MainView::Admin),
        tab("2", "Player", MainView::Player),
        Span::styled(
            format!("  {} tracks, {active} active", tracks.len()),
            Style::default().fg(app.theme.table_order_fg),
        ),
    ]);

    f.render_widget(Paragraph::new(header), area);
}

fn draw_confirm_delete(f: &mut Frame, area: Rect, track: &Track, theme: &Theme) {
    let popup = centered_rect(area, 50, 5);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Delete track ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.status_error_fg))
        .padding(Padding::horizontal(1));

    let text = vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(track.name.as_str(), Style::default().bold().fg(theme.accent_colour)),
            Span::raw("?"),
        ]),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.accent_colour)),
            Span::raw(" confirm, any other key cancels"),
        ]),
    ];

    f.render_widget(Paragraph::new(text).block(block), popup);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let line = match app.status.current() {
        Some(message) => {
            let fg = match message.kind {
                StatusKind::Info => theme.status_info_fg,
                StatusKind::Error => theme.status_error_fg,
            };
            Line::from(Span::styled(message.text.as_str(), Style::default().bold().fg(fg)))
        }
        None => {
            let help: &[(&str, &str)] = match app.main_view {
                MainView::Admin => &[
                    ("a", "add"),
                    ("K/J", "move"),
                    ("t", "toggle"),
                    ("p", "preview"),
                    ("x", "delete"),
                    ("r", "refresh"),
                    ("q", "quit"),
                ],
                MainView::Player => &[("r", "refresh"), ("q", "quit")],
            };
            Line::from(
                help.iter()
                    .flat_map(|(key, action)| {
                        [
                            Span::styled(*key, Style::default().fg(theme.accent_colour)),
                            Span::styled(
                                format!(" {action}  "),
                                Style::default().fg(theme.border_colour),
                            ),
                        ]
                    })
                    .collect::<Vec<_>>(),
            )
        }
    };

    f.render_widget(Paragraph::new(line), area);
}
