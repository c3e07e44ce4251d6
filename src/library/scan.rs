use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::AudioFile;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Immediate children of `dir`, hidden entries dropped unless configured.
fn children(dir: &Path, settings: &LibrarySettings) -> impl Iterator<Item = DirEntry> {
    let include_hidden = settings.include_hidden;
    WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_entry(move |e| include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
}

fn read_duration(path: &Path) -> Duration {
    match lofty::read_from_path(path) {
        Ok(tagged) => tagged.properties().duration(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "could not read track length");
            Duration::ZERO
        }
    }
}

/// List the playable tracks directly inside `dir`, sorted by name.
pub fn list_tracks(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = children(dir, settings)
        .filter(|e| e.path().is_file() && is_audio_file(e.path(), settings))
        .map(|e| {
            let path = e.path();
            let display_name = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string();
            Track::new(path, display_name, read_duration(path))
        })
        .collect();

    tracks.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
    });
    tracks
}

/// List the subdirectories directly inside `dir`, sorted by name.
pub fn list_dirs(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = children(dir, settings)
        .filter(|e| e.path().is_dir())
        .map(|e| e.into_path())
        .collect();

    dirs.sort_by_key(|p| {
        p.file_name()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    dirs
}
