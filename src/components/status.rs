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

//! Self-dismissing status banner.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatusMessage {
    pub(crate) kind: StatusKind,
    pub(crate) text: String,
    expires_at: Instant,
}

/// Holds at most one message, a new message replaces the current one.
pub(crate) struct StatusLine {
    message: Option<StatusMessage>,
    duration: Duration,
}

impl StatusLine {
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            message: None,
            duration,
        }
    }

    pub(crate) fn info(&mut self, text: impl Into<String>, now: Instant) {
        self.show(StatusKind::Info, text.into(), now);
    }

    pub(crate) fn error(&mut self, text: impl Into<String>, now: Instant) {
        self.show(StatusKind::Error, text.into(), now);
    }

    pub(crate) fn current(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Drops the message once its time is up.
    pub(crate) fn expire(&mut self, now: Instant) {
        if self.message.as_ref().is_some_and(|m| now >= m.expires_at) {
            self.message = None;
        }
    }

    fn show(&mut self, kind: StatusKind, text: String, now: Instant) {
        self.message = Some(StatusMessage {
            kind,
            text,
            expires_at: now + self.duration,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOWN_FOR: Duration = Duration::from_secs(4);

    #[test]
    fn message_is_dismissed_after_its_duration() {
        let start = Instant::now();
        let mut status = StatusLine::new(SHOWN_FOR);
        status.info("Track \"a\" added", start);

        status.expire(start + Duration::from_secs(3));
        assert_eq!(status.current().map(|m| m.kind), Some(StatusKind::Info));

        status.expire(start + SHOWN_FOR);
        assert_eq!(status.current(), None);
    }

    #[test]
    fn new_message_replaces_and_restarts_the_timer() {
        let start = Instant::now();
        let mut status = StatusLine::new(SHOWN_FOR);
        status.info("first", start);

        status.error("second", start + Duration::from_secs(3));
        status.expire(start + SHOWN_FOR);

        let message = status.current().unwrap();
        assert_eq!(message.kind, StatusKind::Error);
        assert_eq!(message.text, "second");
    }
}
