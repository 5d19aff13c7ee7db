// Copyright 2026 The lyricweb Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

use crate::types::{LyricEvent, Lyrics};
use log::{debug, warn};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use thiserror::Error;

/// Text used for a timestamped line with nothing after its tags.
pub const PLACEHOLDER_TEXT: &str = "…";

static TIMESTAMP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9]{1,2}):([0-9]{2})(?:\.([0-9]{1,2}))?\]").unwrap());

/// Something at the start of a line which looks like a timestamp tag but doesn't match the format.
/// Unlike `TIMESTAMP_TAG` this accepts any Unicode digits, so that e.g. fullwidth digits are
/// reported rather than treated as a continuation.
static TIMESTAMP_LIKE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\d+:[^\]]*\]?").unwrap());

const METADATA_KEYS: [&str; 3] = ["ti", "ar", "al"];

/// A problem with a single line of an LRC file.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("line {line}: malformed timestamp tag {tag:?}")]
    MalformedTimestamp { line: usize, tag: String },
    #[error("line {line}: [{key}: tag has no closing bracket")]
    UnterminatedMetadataTag { line: usize, key: &'static str },
}

impl ParseError {
    /// Returns the 1-based line number which the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedTimestamp { line, .. } | Self::UnterminatedMetadataTag { line, .. } => {
                *line
            }
        }
    }
}

/// The result of a lenient parse.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseOutput {
    pub lyrics: Lyrics,
    /// Lines which were skipped, in the order they appeared.
    pub errors: Vec<ParseError>,
}

/// Parses the given LRC text, skipping any malformed lines.
///
/// Skipped lines are logged and reported in [`ParseOutput::errors`].
pub fn parse(text: &str) -> ParseOutput {
    let mut parser = Parser::default();
    let mut errors = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Err(e) = parser.line(index + 1, line) {
            warn!("Skipping {e}");
            errors.push(e);
        }
    }
    ParseOutput {
        lyrics: parser.finish(),
        errors,
    }
}

/// Parses the given LRC text, failing on the first malformed line.
pub fn parse_strict(text: &str) -> Result<Lyrics, ParseError> {
    let mut parser = Parser::default();
    for (index, line) in text.lines().enumerate() {
        parser.line(index + 1, line)?;
    }
    Ok(parser.finish())
}

#[derive(Debug, Default)]
struct Parser {
    lyrics: Lyrics,
    /// Index of the most recently added event, which continuation lines are appended to.
    last_event: Option<usize>,
}

impl Parser {
    fn line(&mut self, number: usize, line: &str) -> Result<(), ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        for key in METADATA_KEYS {
            if let Some(value) = metadata_value(line, key) {
                let value = value
                    .ok_or(ParseError::UnterminatedMetadataTag { line: number, key })?
                    .to_string();
                let metadata = &mut self.lyrics.metadata;
                match key {
                    "ti" => metadata.title = value,
                    "ar" => metadata.artist = value,
                    _ => metadata.album = value,
                }
                return Ok(());
            }
        }

        let mut starts = Vec::new();
        let mut text_start = 0;
        for captures in TIMESTAMP_TAG.captures_iter(line) {
            starts.push(tag_start(&captures, number)?);
            text_start = captures.get(0).map_or(text_start, |tag| tag.end());
        }

        if starts.is_empty() {
            if let Some(tag) = TIMESTAMP_LIKE_TAG.find(line) {
                return Err(ParseError::MalformedTimestamp {
                    line: number,
                    tag: tag.as_str().to_string(),
                });
            }
            match self.last_event {
                Some(index) => {
                    let event = &mut self.lyrics.events[index];
                    event.text.push(' ');
                    event.text.push_str(line);
                }
                None => debug!("Dropping line {number} before first timestamp: {line:?}"),
            }
            return Ok(());
        }

        let text = match line[text_start..].trim() {
            "" => PLACEHOLDER_TEXT,
            text => text,
        };
        for start in starts {
            self.lyrics.events.push(LyricEvent::new(start, text));
        }
        self.last_event = Some(self.lyrics.events.len() - 1);
        Ok(())
    }

    fn finish(mut self) -> Lyrics {
        self.lyrics
            .events
            .sort_by(|a, b| a.start.total_cmp(&b.start));
        self.lyrics
    }
}

/// Converts a match of `TIMESTAMP_TAG` to seconds.
fn tag_start(captures: &Captures, line: usize) -> Result<f64, ParseError> {
    let malformed = || ParseError::MalformedTimestamp {
        line,
        tag: captures[0].to_string(),
    };
    let minutes: u32 = captures[1].parse().map_err(|_| malformed())?;
    let seconds: u32 = captures[2].parse().map_err(|_| malformed())?;
    let hundredths: u32 = match captures.get(3) {
        Some(fraction) => fraction.as_str().parse().map_err(|_| malformed())?,
        None => 0,
    };
    Ok(f64::from(minutes * 60 + seconds) + f64::from(hundredths) / 100.0)
}

/// If the line is a metadata tag with the given key, returns its trimmed value, or `None` if the
/// closing bracket is missing.
///
/// The value ends at the `]` which balances the tag's opening `[`, so it may contain nested
/// brackets. Anything after that is ignored.
fn metadata_value<'a>(line: &'a str, key: &str) -> Option<Option<&'a str>> {
    let rest = line.strip_prefix('[')?.strip_prefix(key)?.strip_prefix(':')?;
    let mut depth = 1;
    for (index, c) in rest.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(Some(rest[..index].trim()));
                }
            }
            _ => {}
        }
    }
    Some(None)
}
