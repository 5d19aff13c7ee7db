// Copyright 2026 The lyricweb Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

//! Parser for LRC files, the line-oriented synchronised lyrics format where each lyric line is
//! prefixed by one or more `[mm:ss.xx]` timestamp tags.
//!
//! [`parse`] is the main entry point, e.g.:
//!
//! ```
//! let output = lrc::parse("[ti:Song]\n[00:01.00]Hello\n[00:02.50]world");
//! assert_eq!(output.lyrics.metadata.title, "Song");
//! assert_eq!(output.lyrics.events[1].start, 2.5);
//! ```

mod parser;
pub mod types;

pub use crate::parser::{PLACEHOLDER_TEXT, ParseError, ParseOutput, parse, parse_strict};
