use std::path::Path;
use std::time::Duration;

use super::error::BackendError;

/// What the playback session needs from an audio output.
///
/// Methods take `&self` so one backend can be shared between the foreground
/// flow and a progress reporter thread.
pub trait AudioBackend: Send + Sync {
    /// Replace whatever is loaded with `path`, paused at position zero.
    fn load(&self, path: &Path) -> Result<(), BackendError>;
    /// Start (or resume) the loaded track.
    fn play(&self) -> Result<(), BackendError>;
    /// Stop and unload the current track. Never fails; stopping nothing is fine.
    fn stop(&self);
    /// Whether a loaded track still has audio left to play.
    fn is_busy(&self) -> Result<bool, BackendError>;
    /// Elapsed playback time of the loaded track. Resets to zero on load/stop.
    fn position(&self) -> Result<Duration, BackendError>;
}
