use std::path::PathBuf;

use thiserror::Error;

use crate::audio::BackendError;

/// Failures contained to one playback attempt.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The backend could not load or start the track.
    #[error("cannot play {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    /// The backend failed while progress was being polled.
    #[error("lost track of {}: {source}", path.display())]
    Poll {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

impl PlaybackError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Load { path, .. } | Self::Poll { path, .. } => path,
        }
    }
}
