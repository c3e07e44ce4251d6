use std::sync::mpsc::Sender;
use std::sync::{Arc, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::audio::{AudioBackend, BackendError};
use crate::library::Track;

use super::cancel::CancellationToken;
use super::error::PlaybackError;
use super::events::{PlayerEvent, Progress};
use super::session::SharedState;

/// Terminal state of a progress reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterOutcome {
    /// The backend stopped being busy: the track played to its end.
    Completed,
    /// The token was cancelled (stop, switch, or the UI went away).
    Cancelled,
    /// A newer session started; this reporter went quiet.
    Superseded,
    /// A backend query failed.
    Errored,
}

/// Polls the backend for one playback session and emits progress events.
pub(super) struct Reporter {
    pub(super) generation: u64,
    pub(super) track: Track,
    pub(super) poll_interval: Duration,
    pub(super) token: CancellationToken,
    pub(super) backend: Arc<dyn AudioBackend>,
    pub(super) state: SharedState,
    pub(super) events: Sender<PlayerEvent>,
}

impl Reporter {
    pub(super) fn run(self) -> ReporterOutcome {
        loop {
            if self.token.is_cancelled() {
                return ReporterOutcome::Cancelled;
            }

            let busy = match self.backend.is_busy() {
                Ok(busy) => busy,
                Err(e) => return self.fail(e),
            };
            if !busy {
                return self
                    .emit(PlayerEvent::Completed)
                    .unwrap_or(ReporterOutcome::Completed);
            }

            let position = match self.backend.position() {
                Ok(position) => position,
                Err(e) => return self.fail(e),
            };
            let progress = Progress::new(position, self.track.duration);
            if let Some(outcome) = self.emit(PlayerEvent::Tick(progress)) {
                return outcome;
            }

            if self.token.wait_timeout(self.poll_interval) {
                return ReporterOutcome::Cancelled;
            }
        }
    }

    /// Deliver `event` if this reporter is still current.
    ///
    /// The state lock is held across the check and the send; the session
    /// bumps the generation and cancels under the same lock, so a stale event
    /// can never land after a newer session's first event.
    fn emit(&self, event: PlayerEvent) -> Option<ReporterOutcome> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if self.token.is_cancelled() {
            return Some(ReporterOutcome::Cancelled);
        }
        if state.generation != self.generation {
            return Some(ReporterOutcome::Superseded);
        }
        if self.events.send(event).is_err() {
            debug!(generation = self.generation, "event receiver gone");
            return Some(ReporterOutcome::Cancelled);
        }
        None
    }

    fn fail(&self, source: BackendError) -> ReporterOutcome {
        let message = source.to_string();
        let err = PlaybackError::Poll {
            path: self.track.path.clone(),
            source,
        };
        warn!(generation = self.generation, error = %err, "progress polling failed");
        self.emit(PlayerEvent::PlaybackError {
            path: self.track.path.clone(),
            message,
        })
        .unwrap_or(ReporterOutcome::Errored)
    }
}

/// A running reporter thread as seen from the session.
pub(super) struct ReporterHandle {
    generation: u64,
    token: CancellationToken,
    join: JoinHandle<ReporterOutcome>,
}

impl ReporterHandle {
    pub(super) fn cancel(&self) {
        self.token.cancel();
    }

    pub(super) fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the thread. A panicked reporter counts as `Errored`.
    pub(super) fn join(self) -> ReporterOutcome {
        let generation = self.generation;
        let outcome = self.join.join().unwrap_or(ReporterOutcome::Errored);
        debug!(generation, ?outcome, "reporter finished");
        outcome
    }
}

pub(super) fn spawn(reporter: Reporter) -> ReporterHandle {
    let generation = reporter.generation;
    let token = reporter.token.clone();
    let join = thread::spawn(move || reporter.run());
    ReporterHandle {
        generation,
        token,
        join,
    }
}
