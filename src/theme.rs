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

//! Visual styling and color configuration for the TUI.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,

    pub(crate) highlight_bg: Color,
    pub(crate) highlight_fg: Color,

    pub(crate) table_order_fg: Color,
    pub(crate) table_name_fg: Color,
    pub(crate) table_active_fg: Color,
    pub(crate) table_inactive_fg: Color,
    pub(crate) table_link_fg: Color,

    pub(crate) failed_fg: Color,

    pub(crate) status_info_fg: Color,
    pub(crate) status_error_fg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(40, 20, 50),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            gauge_track_colour: Color::Rgb(50, 30, 60),

            highlight_bg: Color::Blue,
            highlight_fg: Color::White,

            table_order_fg: Color::Rgb(162, 161, 166),
            table_name_fg: Color::Rgb(255, 255, 255),
            table_active_fg: Color::Rgb(142, 192, 124),
            table_inactive_fg: Color::Rgb(162, 161, 166),
            table_link_fg: Color::Rgb(179, 157, 219),

            failed_fg: Color::Rgb(251, 73, 52),

            status_info_fg: Color::Rgb(142, 192, 124),
            status_error_fg: Color::Rgb(251, 73, 52),
        }
    }
}
