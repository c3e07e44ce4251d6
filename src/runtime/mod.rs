use std::env;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::{AudioBackend, RodioBackend};
use crate::logging;
use crate::playback::{PlaybackSession, PlayerEvent};

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, warning) = settings::load_settings();
    let _log_guard = logging::init_or_warn(&settings.log);
    if let Some(msg) = warning {
        warn!("{msg}");
    }

    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let dir = dir.canonicalize().unwrap_or(dir);
    info!(dir = %dir.display(), "starting");

    let backend = Arc::new(RodioBackend::new()?);
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
    let session = PlaybackSession::new(
        Arc::clone(&backend) as Arc<dyn AudioBackend>,
        event_tx,
        settings.playback.poll_interval(),
    );

    let mut app = App::new(dir.clone());
    event_loop::open_dir(&mut app, dir, &settings.library);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &session, &event_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Never leave audio playing after the UI is gone.
    session.shutdown();
    backend.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    info!("bye");

    run_result
}
