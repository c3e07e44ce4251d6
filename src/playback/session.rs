use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::AudioBackend;
use crate::library::Track;

use super::cancel::CancellationToken;
use super::error::PlaybackError;
use super::events::PlayerEvent;
use super::reporter::{self, Reporter, ReporterHandle, ReporterOutcome};

/// What is playing right now. Written only by `PlaybackSession`; reporters
/// read `generation` through the same lock.
#[derive(Default)]
pub(super) struct PlaybackState {
    pub(super) active_track: Option<Track>,
    pub(super) generation: u64,
    pub(super) reporter: Option<ReporterHandle>,
}

pub(super) type SharedState = Arc<Mutex<PlaybackState>>;

/// Owns the backend's current track and its progress reporter.
pub struct PlaybackSession {
    backend: Arc<dyn AudioBackend>,
    state: SharedState,
    events: Sender<PlayerEvent>,
    poll_interval: Duration,
}

impl PlaybackSession {
    pub fn new(
        backend: Arc<dyn AudioBackend>,
        events: Sender<PlayerEvent>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(PlaybackState::default())),
            events,
            poll_interval,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, PlaybackState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch playback to `track`.
    ///
    /// The previous reporter is cancelled and the previous track stopped
    /// before the new one is loaded. A load/play failure is sent to the UI as
    /// `PlayerEvent::PlaybackError` and returned; the session is then idle.
    pub fn start(&self, track: Track) -> Result<(), PlaybackError> {
        let mut state = self.lock_state();

        if let Some(old) = state.reporter.take() {
            old.cancel();
        }
        if let Some(previous) = state.active_track.take() {
            self.backend.stop();
            debug!(path = %previous.path.display(), "stopped previous track");
        }

        state.generation += 1;
        let generation = state.generation;

        let started = self.backend.load(&track.path).and_then(|()| {
            self.backend.play().inspect_err(|_| self.backend.stop())
        });
        if let Err(source) = started {
            let message = source.to_string();
            let err = PlaybackError::Load {
                path: track.path.clone(),
                source,
            };
            warn!(generation, error = %err, "playback failed to start");
            let _ = self.events.send(PlayerEvent::PlaybackError {
                path: track.path,
                message,
            });
            return Err(err);
        }

        info!(generation, path = %track.path.display(), "now playing");
        let _ = self.events.send(PlayerEvent::NowPlaying {
            display_name: track.display_name.clone(),
            total: track.duration,
        });
        state.active_track = Some(track.clone());
        state.reporter = Some(reporter::spawn(Reporter {
            generation,
            track,
            poll_interval: self.poll_interval,
            token: CancellationToken::new(),
            backend: Arc::clone(&self.backend),
            state: Arc::clone(&self.state),
            events: self.events.clone(),
        }));
        Ok(())
    }

    /// Stop playback. Does nothing when idle.
    pub fn stop(&self) {
        // Dropping the handle detaches the thread; it is already cancelled.
        let _ = self.halt();
    }

    fn halt(&self) -> Option<ReporterHandle> {
        let mut state = self.lock_state();
        let reporter = state.reporter.take();
        if let Some(handle) = &reporter {
            handle.cancel();
        }
        if let Some(track) = state.active_track.take() {
            self.backend.stop();
            info!(generation = state.generation, path = %track.path.display(), "stopped");
        }
        reporter
    }

    /// Collect a reporter that has exited on its own.
    ///
    /// Returns its outcome once; a completed or failed track is no longer
    /// active afterwards.
    pub fn reap(&self) -> Option<ReporterOutcome> {
        let mut state = self.lock_state();
        if !state.reporter.as_ref().is_some_and(ReporterHandle::is_finished) {
            return None;
        }
        let outcome = state.reporter.take()?.join();
        if matches!(
            outcome,
            ReporterOutcome::Completed | ReporterOutcome::Errored
        ) {
            state.active_track = None;
        }
        Some(outcome)
    }

    /// Stop playback and wait for the reporter thread to exit.
    pub fn shutdown(&self) {
        if let Some(handle) = self.halt() {
            handle.join();
        }
    }

    pub fn active_track(&self) -> Option<Track> {
        self.lock_state().active_track.clone()
    }
}

#[cfg(test)]
impl PlaybackSession {
    pub(super) fn generation(&self) -> u64 {
        self.lock_state().generation
    }

    pub(super) fn has_reporter(&self) -> bool {
        self.lock_state().reporter.is_some()
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
