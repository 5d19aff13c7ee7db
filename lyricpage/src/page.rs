// Copyright 2026 The lyricweb Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

use lrc::types::Lyrics;
use std::{collections::BTreeMap, path::Path};

pub const DEFAULT_TITLE: &str = "Unknown Title";
pub const DEFAULT_AUDIO_URL: &str = "assets/song-real.mp3";

/// A transparent 1x1 GIF, used when there is no cover image.
pub const PLACEHOLDER_COVER_URL: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///ywAAAAAAQABAAACAUwAOw==";

const COVER_FILENAME: &str = "cover.jpg";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageOptions<'a> {
    /// URL of the audio track, relative to the generated page.
    pub audio_url: &'a str,
    /// Directory to look for the cover image in.
    pub assets_dir: &'a Path,
}

/// Everything the page template needs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageData {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub cover_url: String,
    pub audio_url: String,
    /// The lyric events as a JSON array of `{"start": …, "text": …}` objects.
    pub data_json: String,
}

impl PageData {
    pub fn new(lyrics: &Lyrics, options: &PageOptions) -> Result<Self, serde_json::Error> {
        let metadata = &lyrics.metadata;
        Ok(Self {
            title: if metadata.title.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                metadata.title.clone()
            },
            artist: metadata.artist.clone(),
            album: metadata.album.clone(),
            cover_url: resolve_cover_url(options.assets_dir),
            audio_url: options.audio_url.to_string(),
            // `</` would end the inline script the data is embedded in.
            data_json: serde_json::to_string(&lyrics.events)?.replace("</", "<\\/"),
        })
    }

    /// Returns the template variables for the page.
    pub fn variables(&self) -> BTreeMap<&'static str, String> {
        [
            ("title", self.title.clone()),
            ("artist", self.artist.clone()),
            ("album", self.album.clone()),
            ("cover_url", self.cover_url.clone()),
            ("audio_url", self.audio_url.clone()),
            ("data_json", self.data_json.clone()),
        ]
        .into_iter()
        .collect()
    }
}

/// Returns the URL of the cover image if there is one in the assets directory, or an inline
/// placeholder image otherwise.
pub fn resolve_cover_url(assets_dir: &Path) -> String {
    if assets_dir.join(COVER_FILENAME).is_file() {
        format!("assets/{COVER_FILENAME}")
    } else {
        PLACEHOLDER_COVER_URL.to_string()
    }
}
