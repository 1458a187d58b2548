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

//! Admin console preview of a single track.

use log::debug;

use crate::player::{MediaSink, SinkError, SinkEvent};

pub(crate) const PREVIEW_FAILED: &str = "Could not play preview, check the link";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PreviewOutcome {
    Started,
    Paused,
}

/// Play/pause toggle over a dedicated sink, independent of the playlist.
pub(crate) struct Preview<S> {
    sink: S,
    link: Option<String>,
    playing: bool,
}

impl<S: MediaSink> Preview<S> {
    pub(crate) fn new(sink: S) -> Self {
        Self {
            sink,
            link: None,
            playing: false,
        }
    }

    /// The link currently previewing, if any.
    pub(crate) fn playing_link(&self) -> Option<&str> {
        self.link.as_deref().filter(|_| self.playing)
    }

    /// Pauses the preview when `link` is already playing, otherwise restarts
    /// the sink on `link` from the beginning.
    pub(crate) fn toggle(&mut self, link: &str) -> Result<PreviewOutcome, SinkError> {
        if self.playing_link() == Some(link) {
            self.playing = false;
            self.sink.pause()?;
            return Ok(PreviewOutcome::Paused);
        }

        self.playing = false;
        if let Err(e) = self.sink.pause() {
            debug!("preview pause before switching failed: {e}");
        }

        self.link = Some(link.to_string());
        self.sink.set_source(link)?;
        self.sink.load()?;
        self.sink.seek_to(0.0)?;
        self.sink.play()?;
        self.playing = true;

        Ok(PreviewOutcome::Started)
    }

    pub(crate) fn on_sink_event(&mut self, event: &SinkEvent) {
        if matches!(event, SinkEvent::Ended | SinkEvent::Error(_)) {
            self.playing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::testing::{RecordingSink, SinkCall};

    const LINK: &str = "https://host/a.mp3?raw=1";
    const OTHER: &str = "https://host/b.mp3?raw=1";

    fn preview() -> (Preview<RecordingSink>, RecordingSink) {
        let sink = RecordingSink::default();
        (Preview::new(sink.clone()), sink)
    }

    #[test]
    fn starts_from_the_beginning() {
        let (mut preview, sink) = preview();

        assert_eq!(preview.toggle(LINK).unwrap(), PreviewOutcome::Started);
        assert_eq!(
            sink.calls(),
            [
                SinkCall::Pause,
                SinkCall::SetSource(LINK.to_string()),
                SinkCall::Load,
                SinkCall::SeekTo(0.0),
                SinkCall::Play,
            ]
        );
        assert_eq!(preview.playing_link(), Some(LINK));
    }

    #[test]
    fn same_link_pauses() {
        let (mut preview, sink) = preview();
        preview.toggle(LINK).unwrap();
        sink.clear();

        assert_eq!(preview.toggle(LINK).unwrap(), PreviewOutcome::Paused);
        assert_eq!(sink.calls(), [SinkCall::Pause]);
        assert_eq!(preview.playing_link(), None);
    }

    #[test]
    fn other_link_switches() {
        let (mut preview, sink) = preview();
        preview.toggle(LINK).unwrap();

        assert_eq!(preview.toggle(OTHER).unwrap(), PreviewOutcome::Started);
        assert_eq!(sink.played(), [LINK, OTHER]);
    }

    #[test]
    fn rejected_link_is_an_error() {
        let (mut preview, sink) = preview();
        sink.reject(LINK);

        assert!(matches!(preview.toggle(LINK), Err(SinkError::Rejected(_))));
        assert_eq!(preview.playing_link(), None);
    }

    #[test]
    fn ended_preview_restarts_on_the_next_toggle() {
        let (mut preview, _sink) = preview();
        preview.toggle(LINK).unwrap();

        preview.on_sink_event(&SinkEvent::Ended);

        assert_eq!(preview.toggle(LINK).unwrap(), PreviewOutcome::Started);
    }
}
