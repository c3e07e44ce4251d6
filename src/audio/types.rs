//! Messages exchanged with the audio thread.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Duration;

use super::error::BackendError;

#[derive(Debug)]
pub enum AudioCmd {
    /// Drop the current sink and prepare a paused one for `path`.
    Load {
        path: PathBuf,
        reply: Sender<Result<(), BackendError>>,
    },
    /// Start the loaded sink.
    Play,
    /// Stop playback immediately and drop the sink.
    Stop,
    /// Report busy/position of the current sink.
    Status { reply: Sender<Status> },
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Snapshot of the audio thread's sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    pub busy: bool,
    pub position: Duration,
}
