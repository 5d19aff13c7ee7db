// Copyright 2026 The lyricweb Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

use serde::{Deserialize, Serialize};

/// The `[ti:]`, `[ar:]` and `[al:]` tags of an LRC file. Missing tags are empty strings.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// A single timestamped line of lyrics.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LyricEvent {
    /// Time in seconds from the start of the track at which the line should be shown.
    pub start: f64,
    pub text: String,
}

impl LyricEvent {
    pub fn new(start: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }
}

/// The result of parsing an LRC file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Lyrics {
    pub metadata: Metadata,
    /// Sorted by `start`.
    pub events: Vec<LyricEvent>,
}

impl Lyrics {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the start time of the last event, or 0 if there are none.
    pub fn duration(&self) -> f64 {
        self.events.last().map_or(0.0, |event| event.start)
    }

    /// Returns the index of the event which should be highlighted at the given time, i.e. the last
    /// one which has started.
    pub fn active_index(&self, time: f64) -> Option<usize> {
        self.events
            .partition_point(|event| event.start <= time)
            .checked_sub(1)
    }
}
