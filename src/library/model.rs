use std::path::PathBuf;
use std::time::Duration;

/// A playable file together with what the player needs to follow it.
///
/// `duration` is `Duration::ZERO` when the length could not be read; progress
/// reporting treats that as "unknown" rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub display_name: String,
    pub duration: Duration,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>, display_name: impl Into<String>, duration: Duration) -> Self {
        Self {
            path: path.into(),
            display_name: display_name.into(),
            duration,
        }
    }
}
