use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unsupported or corrupt audio in {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },
    #[error("no audio output device: {0}")]
    Output(String),
    #[error("audio thread is not running")]
    Disconnected,
}
