// Copyright 2026 The lyricweb Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

use crate::{
    page::{DEFAULT_AUDIO_URL, PageData, PageOptions},
    template::{TemplateError, render},
};
use log::{debug, info};
use lrc::ParseError;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Where to read inputs from and write the page to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildConfig {
    /// The LRC file.
    pub input: PathBuf,
    /// The HTML template for the page.
    pub template: PathBuf,
    /// Directory of files to copy alongside the page.
    pub assets_dir: PathBuf,
    pub out_dir: PathBuf,
    pub audio_url: String,
    /// Whether to fail on malformed lines rather than skipping them.
    pub strict: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: "lyrics.lrc".into(),
            template: "templates/base.html".into(),
            assets_dir: "assets".into(),
            out_dir: "dist".into(),
            audio_url: DEFAULT_AUDIO_URL.to_string(),
            strict: false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildReport {
    /// The generated page.
    pub index_path: PathBuf,
    pub event_count: usize,
    /// Paths of the copied assets within the output directory, sorted.
    pub copied_assets: Vec<PathBuf>,
    /// Lines of the LRC file which were skipped.
    pub parse_errors: Vec<ParseError>,
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
    #[error("{}: {source}", .path.display())]
    Template {
        path: PathBuf,
        source: TemplateError,
    },
    #[error("Error serialising lyrics: {0}")]
    Json(#[from] serde_json::Error),
}

trait IoResultExt<T> {
    fn with_path(self, path: &Path) -> Result<T, BuildError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path(self, path: &Path) -> Result<T, BuildError> {
        self.map_err(|source| BuildError::Io {
            path: path.to_owned(),
            source,
        })
    }
}

/// Parses the LRC file, renders it into the template, writes `index.html` to the output directory
/// and copies the assets next to it.
pub fn build_site(config: &BuildConfig) -> Result<BuildReport, BuildError> {
    fs::create_dir_all(&config.out_dir).with_path(&config.out_dir)?;

    info!("Reading lyrics from {}", config.input.display());
    let text = fs::read_to_string(&config.input).with_path(&config.input)?;
    let (lyrics, parse_errors) = if config.strict {
        let lyrics = lrc::parse_strict(&text).map_err(|source| BuildError::Parse {
            path: config.input.clone(),
            source,
        })?;
        (lyrics, Vec::new())
    } else {
        let output = lrc::parse(&text);
        (output.lyrics, output.errors)
    };
    info!(
        "Parsed {} lyric events, title {:?}",
        lyrics.events.len(),
        lyrics.metadata.title
    );

    let page = PageData::new(
        &lyrics,
        &PageOptions {
            audio_url: &config.audio_url,
            assets_dir: &config.assets_dir,
        },
    )?;
    let template = fs::read_to_string(&config.template).with_path(&config.template)?;
    let html = render(&template, &page.variables()).map_err(|source| BuildError::Template {
        path: config.template.clone(),
        source,
    })?;
    let index_path = config.out_dir.join("index.html");
    fs::write(&index_path, html).with_path(&index_path)?;
    info!("Wrote {}", index_path.display());

    let copied_assets = copy_assets(&config.assets_dir, &config.out_dir.join("assets"))?;

    Ok(BuildReport {
        index_path,
        event_count: lyrics.events.len(),
        copied_assets,
        parse_errors,
    })
}

/// Copies every file directly within `assets_dir` to `dest_dir`, creating it if necessary.
///
/// Subdirectories and hidden files (those whose names start with `.`) are not copied. If
/// `assets_dir` doesn't exist then nothing is copied. Returns the destination paths, sorted.
pub fn copy_assets(assets_dir: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    fs::create_dir_all(dest_dir).with_path(dest_dir)?;
    let entries = match fs::read_dir(assets_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No assets directory at {}", assets_dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e).with_path(assets_dir),
    };

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.with_path(assets_dir)?;
        let source = entry.path();
        if !source.is_file() || entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let dest = dest_dir.join(entry.file_name());
        debug!("Copying {} to {}", source.display(), dest.display());
        fs::copy(&source, &dest).with_path(&source)?;
        copied.push(dest);
    }
    copied.sort();
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PLACEHOLDER_COVER_URL;
    use tempfile::{TempDir, tempdir};

    const TEMPLATE: &str = "<title>{{ title }}</title>\n\
        <p>{{ artist }} / {{ album }}</p>\n\
        <img src=\"{{ cover_url }}\"><audio src=\"{{ audio_url }}\"></audio>\n\
        <script>const LYRICS = {{ data_json|safe }};</script>\n";

    fn setup(lrc: &str) -> (TempDir, BuildConfig) {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("lyrics.lrc"), lrc).unwrap();
        fs::create_dir(root.join("templates")).unwrap();
        fs::write(root.join("templates/base.html"), TEMPLATE).unwrap();
        let config = BuildConfig {
            input: root.join("lyrics.lrc"),
            template: root.join("templates/base.html"),
            assets_dir: root.join("assets"),
            out_dir: root.join("dist"),
            ..Default::default()
        };
        (dir, config)
    }

    #[test]
    fn default_config() {
        let config = BuildConfig::default();
        assert_eq!(config.input, Path::new("lyrics.lrc"));
        assert_eq!(config.template, Path::new("templates/base.html"));
        assert_eq!(config.assets_dir, Path::new("assets"));
        assert_eq!(config.out_dir, Path::new("dist"));
        assert_eq!(config.audio_url, "assets/song-real.mp3");
        assert!(!config.strict);
    }

    #[test]
    fn build_without_assets() {
        let (_dir, config) = setup("[ar:A & B]\n[00:01.00]Hello\n[00:02.00]<world>\n");
        let report = build_site(&config).unwrap();
        assert_eq!(report.index_path, config.out_dir.join("index.html"));
        assert_eq!(report.event_count, 2);
        assert_eq!(report.copied_assets, Vec::<PathBuf>::new());
        assert_eq!(report.parse_errors, vec![]);
        assert!(config.out_dir.join("assets").is_dir());

        let html = fs::read_to_string(&report.index_path).unwrap();
        assert_eq!(
            html,
            format!(
                "<title>Unknown Title</title>\n\
                <p>A &amp; B / </p>\n\
                <img src=\"{PLACEHOLDER_COVER_URL}\"><audio src=\"assets/song-real.mp3\"></audio>\n\
                <script>const LYRICS = [{{\"start\":1.0,\"text\":\"Hello\"}},{{\"start\":2.0,\"text\":\"<world>\"}}];</script>\n"
            )
        );
    }

    #[test]
    fn build_with_assets() {
        let (_dir, config) = setup("[ti:Song]\n[00:01.00]Hello\n");
        fs::create_dir_all(config.assets_dir.join("nested")).unwrap();
        fs::write(config.assets_dir.join("cover.jpg"), b"jpeg").unwrap();
        fs::write(config.assets_dir.join("song-real.mp3"), b"mp3").unwrap();
        fs::write(config.assets_dir.join("nested/skipped.txt"), b"").unwrap();
        fs::write(config.assets_dir.join(".DS_Store"), b"").unwrap();

        let report = build_site(&config).unwrap();
        let out_assets = config.out_dir.join("assets");
        assert_eq!(
            report.copied_assets,
            vec![out_assets.join("cover.jpg"), out_assets.join("song-real.mp3")]
        );
        assert_eq!(fs::read(out_assets.join("song-real.mp3")).unwrap(), b"mp3");
        assert!(!out_assets.join("nested").exists());
        assert!(!out_assets.join(".DS_Store").exists());

        let html = fs::read_to_string(&report.index_path).unwrap();
        assert!(html.contains("<title>Song</title>"));
        assert!(html.contains("<img src=\"assets/cover.jpg\">"));
    }

    #[test]
    fn lenient_reports_errors() {
        let (_dir, config) = setup("[ti:Song\n[00:01.00]Hello\n");
        let report = build_site(&config).unwrap();
        assert_eq!(report.event_count, 1);
        assert_eq!(
            report.parse_errors,
            vec![ParseError::UnterminatedMetadataTag { line: 1, key: "ti" }]
        );
    }

    #[test]
    fn strict_fails() {
        let (_dir, config) = setup("[00:01.00]Hello\n[0:2]Bad\n");
        let config = BuildConfig {
            strict: true,
            ..config
        };
        let error = build_site(&config).unwrap_err();
        assert!(matches!(
            error,
            BuildError::Parse {
                source: ParseError::MalformedTimestamp { line: 2, .. },
                ..
            }
        ));
        assert!(!config.out_dir.join("index.html").exists());
    }

    #[test]
    fn missing_input() {
        let (_dir, config) = setup("");
        fs::remove_file(&config.input).unwrap();
        match build_site(&config) {
            Err(BuildError::Io { path, source }) => {
                assert_eq!(path, config.input);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            result => panic!("Unexpected result {result:?}"),
        }
    }

    #[test]
    fn bad_template() {
        let (_dir, config) = setup("[00:01.00]Hello\n");
        fs::write(&config.template, "{{ cover }}").unwrap();
        assert!(matches!(
            build_site(&config),
            Err(BuildError::Template {
                source: TemplateError::UnknownVariable { .. },
                ..
            })
        ));
    }
}
