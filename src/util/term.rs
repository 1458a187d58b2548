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

//! Terminal background control.
//!
//! Uses the OSC 11 and OSC 111 escape sequences, supported by most modern
//! terminal emulators (XTerm, iTerm2, Alacritty, Kitty). Terminals that do not
//! understand them ignore them.

use std::io::{self, Write};

use ratatui::style::Color;

/// Paints the whole terminal window background, not just the cells ratatui
/// draws, so no thin border of the default colour remains.
///
/// Non-RGB colours are left to the terminal's palette and nothing is sent.
pub(crate) fn set_terminal_bg(colour: Color) -> io::Result<()> {
    let Color::Rgb(r, g, b) = colour else {
        return Ok(());
    };

    let mut stdout = io::stdout();
    write!(stdout, "\x1b]11;#{r:02x}{g:02x}{b:02x}\x07")?;
    stdout.flush()
}

/// Reverts the terminal background to the user's own configuration.
pub(crate) fn reset_terminal_bg() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\x1b]111\x07")?;
    stdout.flush()
}
