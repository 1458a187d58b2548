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

//! UI rendering logic for the track table.
//!
//! This module handles the visual representation of the track records,
//! including column layout, selection highlighting, and theme application
//! using the Ratatui widget system.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::{components::TrackTable, render::icons::ICON_PREVIEW, theme::Theme};

impl TrackTable {
    /// Draws the table, marking the row whose link is being previewed.
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        theme: &Theme,
        previewing: Option<&str>,
    ) {
        let rows = self.tracks.iter().map(|track| {
            let preview_indicator = if previewing == Some(track.playback_link.as_str()) {
                Line::from(ICON_PREVIEW).style(Style::default().fg(theme.accent_colour))
            } else {
                Line::from("")
            };

            let (status, status_fg) = if track.active {
                ("Active", theme.table_active_fg)
            } else {
                ("Inactive", theme.table_inactive_fg)
            };

            Row::new(vec![
                Cell::from(preview_indicator),
                Cell::from(
                    Line::from(track.order.to_string())
                        .style(Style::default().fg(theme.table_order_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(""),
                Cell::from(
                    Line::from(track.name.as_str()).style(Style::default().fg(theme.table_name_fg)),
                ),
                Cell::from(Line::from(status).style(Style::default().fg(status_fg))),
                Cell::from(
                    Line::from(track.source_link.as_str())
                        .style(Style::default().fg(theme.table_link_fg)),
                ),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Percentage(30),
                Constraint::Length(9),
                Constraint::Percentage(70),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(""),
                Cell::from(Line::from("Order").alignment(Alignment::Right)),
                Cell::from(""),
                Cell::from("Name"),
                Cell::from("Status"),
                Cell::from("Link"),
            ])
            .style(Style::default().bold().fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg))
        .block(
            Block::default()
                .title(format!(" Tracks ({}) ", self.tracks.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_colour)),
        );

        f.render_stateful_widget(table, area, &mut self.table_state);
    }
}
