//! Audio output: the backend contract the player depends on, and the
//! `rodio` implementation that drives a dedicated audio thread.

mod backend;
mod error;
mod player;
mod sink;
mod thread;
mod types;

pub use backend::AudioBackend;
pub use error::BackendError;
pub use player::RodioBackend;

#[cfg(test)]
mod tests;
