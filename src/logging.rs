//! File logging. The terminal belongs to the TUI, so everything goes to a
//! daily-rotated file under the configured (or XDG state) directory.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, default_log_dir};

/// Resolve where log files are written.
pub fn log_dir(settings: &LogSettings) -> PathBuf {
    settings
        .directory
        .clone()
        .or_else(default_log_dir)
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// or buffered lines are lost.
pub fn init(settings: &LogSettings) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let dir = log_dir(settings);
    std::fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::daily(&dir, "riff.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(guard)
}

/// Like `init`, but a failure only disables file logging. The reason goes to
/// stderr since the TUI has not taken over the terminal yet.
pub fn init_or_warn(settings: &LogSettings) -> Option<WorkerGuard> {
    match init(settings) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("riff: file logging disabled: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_directory_wins() {
        let settings = LogSettings {
            directory: Some(PathBuf::from("/tmp/riff-logs")),
            ..LogSettings::default()
        };
        assert_eq!(log_dir(&settings), PathBuf::from("/tmp/riff-logs"));
    }

    #[test]
    fn unusable_log_directory_does_not_abort_startup() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let settings = LogSettings {
            directory: Some(blocker.join("logs")),
            ..LogSettings::default()
        };
        assert!(init(&settings).is_err());
        assert!(init_or_warn(&settings).is_none());
    }
}
