// Copyright 2025 The lyricweb Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

use clap::Parser;
use eyre::Report;
use log::warn;
use lrc::types::{Lyrics, Metadata};
use lyricpage::{BuildConfig, DEFAULT_AUDIO_URL, build_site};
use std::{fs, path::PathBuf};

fn main() -> Result<(), Report> {
    pretty_env_logger::init();

    match Args::parse() {
        Args::Build {
            input,
            template,
            assets,
            out,
            audio,
            strict,
        } => {
            let report = build_site(&BuildConfig {
                input,
                template,
                assets_dir: assets,
                out_dir: out,
                audio_url: audio,
                strict,
            })?;
            if !report.parse_errors.is_empty() {
                warn!("Skipped {} malformed lines", report.parse_errors.len());
            }
            println!("✅ Build done → {}", report.index_path.display());
        }
        Args::Print { path, strict } => {
            let text = fs::read_to_string(path)?;
            let lyrics = if strict {
                lrc::parse_strict(&text)?
            } else {
                lrc::parse(&text).lyrics
            };
            print_header(&lyrics.metadata);
            print_lyrics(&lyrics);
        }
    }

    Ok(())
}

#[derive(Clone, Debug, Parser)]
enum Args {
    /// Build a karaoke page from an LRC file.
    Build {
        /// The LRC file to read.
        #[arg(long, default_value = "lyrics.lrc")]
        input: PathBuf,
        /// The HTML template to render.
        #[arg(long, default_value = "templates/base.html")]
        template: PathBuf,
        /// Directory of files to copy to the `assets` directory of the output.
        #[arg(long, default_value = "assets")]
        assets: PathBuf,
        /// Directory to write the page to.
        #[arg(long, default_value = "dist")]
        out: PathBuf,
        /// URL of the audio track, relative to the page.
        #[arg(long, default_value = DEFAULT_AUDIO_URL)]
        audio: String,
        /// Fail on malformed lines rather than skipping them.
        #[arg(long)]
        strict: bool,
    },
    /// Print the lyrics from the given LRC file to standard output.
    Print {
        path: PathBuf,
        /// Fail on malformed lines rather than skipping them.
        #[arg(long)]
        strict: bool,
    },
}

fn print_header(metadata: &Metadata) {
    println!("= {} =", metadata.title);
    if !metadata.artist.is_empty() {
        println!("Artist: {}", metadata.artist);
    }
    if !metadata.album.is_empty() {
        println!("Album: {}", metadata.album);
    }
}

fn print_lyrics(lyrics: &Lyrics) {
    for event in &lyrics.events {
        println!("[{}] {}", format_timestamp(event.start), event.text);
    }
    println!(
        "{} lines, last at {}",
        lyrics.events.len(),
        format_timestamp(lyrics.duration())
    );
}

/// Formats a time in seconds as `mm:ss.cc`.
fn format_timestamp(seconds: f64) -> String {
    let hundredths = (seconds * 100.0).round() as u64;
    format!(
        "{:02}:{:02}.{:02}",
        hundredths / 6000,
        hundredths / 100 % 60,
        hundredths % 100
    )
}
