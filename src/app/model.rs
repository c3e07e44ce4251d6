//! Application model types: `App` and `Focus`.
//!
//! `App` is what the UI renders: the directory being browsed, its
//! subdirectories and tracks, the selection in each list, and the
//! now-playing view fed by `PlayerEvent`s.

use std::path::{Path, PathBuf};

use crate::library::{Track, format_mss};
use crate::playback::PlayerEvent;

/// Which list receives navigation keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Dirs,
    Tracks,
}

/// The main application model.
pub struct App {
    pub current_dir: PathBuf,
    pub dirs: Vec<PathBuf>,
    pub tracks: Vec<Track>,
    pub focus: Focus,
    pub selected_dir: usize,
    pub selected_track: usize,

    pub now_playing: Option<String>,
    pub elapsed_label: String,
    pub total_label: String,
    pub percent: f64,
    pub finished: bool,
    pub status: Option<String>,
}

impl App {
    pub fn new(current_dir: PathBuf) -> Self {
        Self {
            current_dir,
            dirs: Vec::new(),
            tracks: Vec::new(),
            focus: Focus::Dirs,
            selected_dir: 0,
            selected_track: 0,

            now_playing: None,
            elapsed_label: format_mss(Default::default()),
            total_label: format_mss(Default::default()),
            percent: 0.0,
            finished: false,
            status: None,
        }
    }

    /// Replace the browsed directory and its listing; selections reset.
    pub fn set_listing(&mut self, dir: PathBuf, dirs: Vec<PathBuf>, tracks: Vec<Track>) {
        self.current_dir = dir;
        self.dirs = dirs;
        self.tracks = tracks;
        self.selected_dir = 0;
        self.selected_track = 0;
        if self.dirs.is_empty() && !self.tracks.is_empty() {
            self.focus = Focus::Tracks;
        } else if self.tracks.is_empty() {
            self.focus = Focus::Dirs;
        }
    }

    pub fn parent_dir(&self) -> Option<&Path> {
        self.current_dir.parent()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Dirs => Focus::Tracks,
            Focus::Tracks => Focus::Dirs,
        };
    }

    fn focused_len_and_cursor(&mut self) -> (usize, &mut usize) {
        match self.focus {
            Focus::Dirs => (self.dirs.len(), &mut self.selected_dir),
            Focus::Tracks => (self.tracks.len(), &mut self.selected_track),
        }
    }

    /// Move selection down in the focused list, wrapping at the end.
    pub fn next(&mut self) {
        let (len, cursor) = self.focused_len_and_cursor();
        if len > 0 {
            *cursor = (*cursor + 1) % len;
        }
    }

    /// Move selection up in the focused list, wrapping at the top.
    pub fn prev(&mut self) {
        let (len, cursor) = self.focused_len_and_cursor();
        if len > 0 {
            *cursor = (*cursor + len - 1) % len;
        }
    }

    pub fn selected_dir(&self) -> Option<&PathBuf> {
        self.dirs.get(self.selected_dir)
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.tracks.get(self.selected_track)
    }

    /// Fold a playback event into the now-playing view.
    pub fn apply_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::NowPlaying {
                display_name,
                total,
            } => {
                self.now_playing = Some(display_name);
                self.total_label = format_mss(total);
                self.elapsed_label = format_mss(Default::default());
                self.percent = 0.0;
                self.finished = false;
                self.status = None;
            }
            PlayerEvent::Tick(progress) => {
                self.elapsed_label = progress.elapsed_label();
                self.percent = progress.percent();
            }
            PlayerEvent::Completed => {
                self.finished = true;
                if self.percent > 0.0 {
                    self.percent = 100.0;
                    self.elapsed_label = self.total_label.clone();
                }
            }
            PlayerEvent::PlaybackError { message, .. } => {
                self.now_playing = None;
                self.percent = 0.0;
                self.elapsed_label = format_mss(Default::default());
                self.status = Some(format!("Error: {message}"));
            }
        }
    }

    /// Reset the now-playing view after an explicit stop.
    pub fn clear_now_playing(&mut self) {
        self.now_playing = None;
        self.finished = false;
        self.percent = 0.0;
        self.elapsed_label = format_mss(Default::default());
        self.total_label = format_mss(Default::default());
    }
}
