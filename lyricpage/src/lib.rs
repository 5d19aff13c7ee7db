// Copyright 2026 The lyricweb Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

//! Builds a static karaoke page from an LRC file, an HTML template and a directory of assets.

mod build;
mod page;
mod template;

pub use crate::{
    build::{BuildConfig, BuildError, BuildReport, build_site, copy_assets},
    page::{
        DEFAULT_AUDIO_URL, DEFAULT_TITLE, PLACEHOLDER_COVER_URL, PageData, PageOptions,
        resolve_cover_url,
    },
    template::{TemplateError, escape_html, render},
};
