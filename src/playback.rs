//! Playback session and progress reporting.
//!
//! `PlaybackSession` is the only place that starts or stops tracks. Each
//! successful start spawns one progress reporter thread that polls the
//! backend and turns its position into `PlayerEvent`s for the UI. A
//! generation counter, bumped on every start, lets a superseded reporter
//! notice it is stale and exit without emitting anything further.

mod cancel;
mod error;
mod events;
mod reporter;
mod session;

pub use error::PlaybackError;
pub use events::{PlayerEvent, Progress};
pub use reporter::ReporterOutcome;
pub use session::PlaybackSession;

#[cfg(test)]
pub(crate) mod testing;
