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

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::{
    components::{FormField, TrackForm},
    render::centered_rect,
    theme::Theme,
};

const LABEL_WIDTH: u16 = 7;

impl TrackForm {
    /// Draws the form as a popup over `area`, with the cursor in the focused
    /// input.
    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(area, 70, 9);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Add track ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent_colour))
            .padding(Padding::horizontal(1));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let fields = [
            (FormField::Link, "Link", rows[0]),
            (FormField::Name, "Name", rows[2]),
            (FormField::Order, "Order", rows[4]),
        ];

        for (field, label, row) in fields {
            let focused = self.focus() == field;
            let input = self.input(field);

            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)])
                .split(row);

            let label_style = if focused {
                Style::default().bold().fg(theme.accent_colour)
            } else {
                Style::default().fg(theme.table_order_fg)
            };
            f.render_widget(Paragraph::new(label).style(label_style), columns[0]);

            // Keep the cursor in view for values wider than the field
            let width = columns[1].width.max(1) as usize;
            let scroll = input.visual_scroll(width);
            f.render_widget(
                Paragraph::new(input.value())
                    .scroll((0, scroll as u16))
                    .style(Style::default().fg(theme.table_name_fg).bg(theme.gauge_track_colour)),
                columns[1],
            );

            if focused {
                let cursor_x = columns[1].x + (input.visual_cursor().saturating_sub(scroll)) as u16;
                f.set_cursor_position((cursor_x, columns[1].y));
            }
        }

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().fg(theme.accent_colour)),
            Span::raw(" next field  "),
            Span::styled("Enter", Style::default().fg(theme.accent_colour)),
            Span::raw(" add  "),
            Span::styled("Esc", Style::default().fg(theme.accent_colour)),
            Span::raw(" cancel"),
        ]);
        f.render_widget(Paragraph::new(help), rows[6]);
    }
}
