// src/tasks/metadata.rs

//! Track metadata helpers.
//!
//! Track identities look like `#NowPlaying: Title __by__ Artist`. The
//! `__by__` separator lets us split title from artist even when either
//! contains the word "by".

use crate::clients::icecast::NOW_PLAYING_TAG;

pub const ARTIST_SEPARATOR: &str = "__by__";

/// Split a track identity into `(title, artist)`. The artist is empty when
/// there is no separator.
pub fn split_metadata(metadata: &str) -> (String, String) {
    let (title, artist) = match metadata.split_once(ARTIST_SEPARATOR) {
        Some((t, a)) => (t, a.trim()),
        None => (metadata, ""),
    };
    let title = title.trim();
    let title = title.strip_prefix(NOW_PLAYING_TAG.trim_end()).unwrap_or(title);
    (title.trim().to_string(), artist.to_string())
}

/// Text posted to the now-playing channel.
pub fn announcement_text(metadata: &str) -> String {
    metadata.replace(ARTIST_SEPARATOR, "by")
}
