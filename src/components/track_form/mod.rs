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

//! Add-track form.
//!
//! Three text inputs, a share link, an optional name and an optional order
//! number. `Tab` and `BackTab` move between them, `Enter` submits and `Esc`
//! closes the form. Every other key is delegated to the focused input.

mod render;

use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

pub(crate) const MISSING_LINK: &str = "A share link is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Link,
    Name,
    Order,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Link => FormField::Name,
            FormField::Name => FormField::Order,
            FormField::Order => FormField::Link,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormField::Link => FormField::Order,
            FormField::Name => FormField::Link,
            FormField::Order => FormField::Name,
        }
    }
}

/// What the operator asked for. Blank name and non-numeric order are left
/// for the store to fill in.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrackRequest {
    pub(crate) link: String,
    pub(crate) name: Option<String>,
    pub(crate) order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TrackFormAction {
    Submit(TrackRequest),
    /// Submission refused, the form stays open.
    Invalid(&'static str),
    Cancelled,
}

pub(crate) struct TrackForm {
    active: bool,
    focus: FormField,
    link: Input,
    name: Input,
    order: Input,
}

impl TrackForm {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            focus: FormField::Link,
            link: Input::default(),
            name: Input::default(),
            order: Input::default(),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn open(&mut self) {
        self.active = true;
        self.focus = FormField::Link;
    }

    pub(crate) fn focus(&self) -> FormField {
        self.focus
    }

    pub(crate) fn input(&self, field: FormField) -> &Input {
        match field {
            FormField::Link => &self.link,
            FormField::Name => &self.name,
            FormField::Order => &self.order,
        }
    }

    pub(crate) fn process_event(&mut self, event: &Event) -> Option<TrackFormAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Esc => {
                self.close();
                Some(TrackFormAction::Cancelled)
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                None
            }
            KeyCode::Enter => Some(self.submit()),
            _ => {
                let input = match self.focus {
                    FormField::Link => &mut self.link,
                    FormField::Name => &mut self.name,
                    FormField::Order => &mut self.order,
                };
                input.handle_event(event);
                None
            }
        }
    }

    fn submit(&mut self) -> TrackFormAction {
        let link = self.link.value().trim();
        if link.is_empty() {
            self.focus = FormField::Link;
            return TrackFormAction::Invalid(MISSING_LINK);
        }

        let name = self.name.value().trim();
        let request = TrackRequest {
            link: link.to_string(),
            name: (!name.is_empty()).then(|| name.to_string()),
            order: self.order.value().trim().parse().ok(),
        };

        self.close();

        TrackFormAction::Submit(request)
    }

    fn close(&mut self) {
        self.active = false;
        self.focus = FormField::Link;
        self.link.reset();
        self.name.reset();
        self.order.reset();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(form: &mut TrackForm, text: &str) {
        for c in text.chars() {
            assert_eq!(form.process_event(&key(KeyCode::Char(c))), None);
        }
    }

    fn open_form() -> TrackForm {
        let mut form = TrackForm::new();
        form.open();
        form
    }

    #[test]
    fn submits_all_three_fields() {
        let mut form = open_form();
        type_text(&mut form, " https://host/a.mp3 ");
        form.process_event(&key(KeyCode::Tab));
        type_text(&mut form, "Opening");
        form.process_event(&key(KeyCode::Tab));
        type_text(&mut form, "7");

        assert_eq!(
            form.process_event(&key(KeyCode::Enter)),
            Some(TrackFormAction::Submit(TrackRequest {
                link: "https://host/a.mp3".to_string(),
                name: Some("Opening".to_string()),
                order: Some(7),
            }))
        );
        assert!(!form.is_active());
        assert_eq!(form.input(FormField::Link).value(), "");
    }

    #[test]
    fn blank_name_and_bad_order_are_left_unset() {
        let mut form = open_form();
        type_text(&mut form, "https://host/a.mp3");
        form.process_event(&key(KeyCode::BackTab));
        type_text(&mut form, "seven");

        assert_eq!(
            form.process_event(&key(KeyCode::Enter)),
            Some(TrackFormAction::Submit(TrackRequest {
                link: "https://host/a.mp3".to_string(),
                name: None,
                order: None,
            }))
        );
    }

    #[test]
    fn missing_link_keeps_the_form_open() {
        let mut form = open_form();
        form.process_event(&key(KeyCode::Tab));
        type_text(&mut form, "Opening");

        assert_eq!(
            form.process_event(&key(KeyCode::Enter)),
            Some(TrackFormAction::Invalid(MISSING_LINK))
        );
        assert!(form.is_active());
        assert_eq!(form.focus(), FormField::Link);
        assert_eq!(form.input(FormField::Name).value(), "Opening");
    }

    #[test]
    fn escape_discards_the_input() {
        let mut form = open_form();
        type_text(&mut form, "https://host/a.mp3");

        assert_eq!(
            form.process_event(&key(KeyCode::Esc)),
            Some(TrackFormAction::Cancelled)
        );
        assert!(!form.is_active());

        form.open();
        assert_eq!(form.input(FormField::Link).value(), "");
    }
}
