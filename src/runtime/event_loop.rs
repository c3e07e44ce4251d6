use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, Focus};
use crate::config::{self, LibrarySettings};
use crate::library::{list_dirs, list_tracks};
use crate::playback::{PlaybackSession, PlayerEvent};
use crate::ui;

/// Read `dir` and make it the browsed directory.
pub fn open_dir(app: &mut App, dir: PathBuf, library: &LibrarySettings) {
    let dirs = list_dirs(&dir, library);
    let tracks = list_tracks(&dir, library);
    debug!(dir = %dir.display(), dirs = dirs.len(), tracks = tracks.len(), "listed directory");
    app.set_listing(dir, dirs, tracks);
}

/// Stop playback and clear the now-playing view.
///
/// Events queued before the stop are folded in first so a late `Tick` cannot
/// repaint progress for a track that is gone. Once `stop` returns the
/// reporter can no longer send, so nothing arrives after the drain.
pub fn stop_playback(app: &mut App, session: &PlaybackSession, events: &Receiver<PlayerEvent>) {
    session.stop();
    while let Ok(event) = events.try_recv() {
        app.apply_event(event);
    }
    app.clear_now_playing();
}

/// Main terminal event loop: forwards playback events to the app, draws,
/// and turns key presses into session commands. Returns `Ok(())` on quit.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &PlaybackSession,
    events: &Receiver<PlayerEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(event) = events.try_recv() {
            app.apply_event(event);
        }
        if let Some(outcome) = session.reap() {
            debug!(?outcome, "progress reporter ended");
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, session, events) {
                    return Ok(());
                }
            }
        }
    }
}

/// Returns `true` when the user asked to quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    session: &PlaybackSession,
    events: &Receiver<PlayerEvent>,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Backspace | KeyCode::Char('h') => {
            if let Some(parent) = app.parent_dir().map(|p| p.to_path_buf()) {
                open_dir(app, parent, &settings.library);
            }
        }
        KeyCode::Char('s') => stop_playback(app, session, events),
        KeyCode::Enter => match app.focus {
            Focus::Dirs => {
                if let Some(dir) = app.selected_dir().cloned() {
                    open_dir(app, dir, &settings.library);
                }
            }
            Focus::Tracks => {
                // Re-selecting the playing track restarts it.
                if let Some(track) = app.selected_track().cloned() {
                    // Failures already reached the UI as a PlayerEvent.
                    if let Err(e) = session.start(track) {
                        debug!(path = %e.path().display(), "start failed");
                    }
                }
            }
        },
        _ => {}
    }

    false
}
