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

//! Share link conversion.
//!
//! Share links from file hosting services open a landing page rather than
//! the file itself. Adding the `raw=1` query pair turns such a link into one
//! that streams the raw bytes, which is what the audio sink needs.

const RAW_MARKER: &str = "raw=1";

/// Converts a share link into a direct-download link.
///
/// The `raw=1` pair is appended to the query, or becomes the query when the
/// link has none. A trailing `#fragment` is kept at the end. A link that
/// already contains `raw=1` anywhere is returned unchanged, so the conversion
/// is idempotent.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_share_link("https://www.dropbox.com/s/abc/x.mp3?dl=0"),
///     "https://www.dropbox.com/s/abc/x.mp3?dl=0&raw=1"
/// );
/// ```
pub(crate) fn normalize_share_link(link: &str) -> String {
    let (base, fragment) = match link.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (link, None),
    };

    if link.contains(RAW_MARKER) {
        return link.to_string();
    }

    let query = base.split_once('?').map(|(_, query)| query);

    let mut normalized = String::with_capacity(link.len() + RAW_MARKER.len() + 1);
    normalized.push_str(base);

    match query {
        Some(q) if q.is_empty() || q.ends_with('&') => {}
        Some(_) => normalized.push('&'),
        None => normalized.push('?'),
    }
    normalized.push_str(RAW_MARKER);

    if let Some(fragment) = fragment {
        normalized.push('#');
        normalized.push_str(fragment);
    }

    normalized
}

/// Generates the default display name for a track from its order number.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(generate_track_name(5), "Track 005");
/// ```
pub(crate) fn generate_track_name(order: i64) -> String {
    format!("Track {order:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_to_an_existing_query() {
        assert_eq!(
            normalize_share_link("https://www.dropbox.com/s/abc/x.mp3?dl=0"),
            "https://www.dropbox.com/s/abc/x.mp3?dl=0&raw=1"
        );
    }

    #[test]
    fn starts_a_query_when_there_is_none() {
        assert_eq!(
            normalize_share_link("https://www.dropbox.com/s/abc/x.mp3"),
            "https://www.dropbox.com/s/abc/x.mp3?raw=1"
        );
    }

    #[test]
    fn marked_link_is_unchanged() {
        let link = "https://www.dropbox.com/s/abc/x.mp3?raw=1&dl=0";
        assert_eq!(normalize_share_link(link), link);
    }

    #[test]
    fn normalizing_twice_gives_the_same_link() {
        for link in [
            "https://www.dropbox.com/s/abc/x.mp3?dl=0",
            "https://www.dropbox.com/s/abc/x.mp3",
            "https://www.dropbox.com/s/abc/x.mp3?",
            "https://host/x.mp3?dl=0#intro",
        ] {
            let once = normalize_share_link(link);
            assert_eq!(normalize_share_link(&once), once);
        }
    }

    #[test]
    fn keeps_the_fragment_last() {
        assert_eq!(
            normalize_share_link("https://host/x.mp3?dl=0#intro"),
            "https://host/x.mp3?dl=0&raw=1#intro"
        );
    }

    #[test]
    fn does_not_double_separators() {
        assert_eq!(normalize_share_link("https://host/x.mp3?"), "https://host/x.mp3?raw=1");
        assert_eq!(
            normalize_share_link("https://host/x.mp3?dl=0&"),
            "https://host/x.mp3?dl=0&raw=1"
        );
    }

    #[test]
    fn any_occurrence_of_the_marker_counts_as_marked() {
        for link in [
            "https://host/x.mp3?raw=10",
            "https://host/x.mp3?draw=1",
            "https://host/raw=1/x.mp3",
            "https://host/x.mp3#raw=1",
        ] {
            assert_eq!(normalize_share_link(link), link);
        }
    }

    #[test]
    fn track_names_are_zero_padded() {
        assert_eq!(generate_track_name(5), "Track 005");
        assert_eq!(generate_track_name(42), "Track 042");
        assert_eq!(generate_track_name(1234), "Track 1234");
    }
}
