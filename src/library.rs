//! Track catalog: lists the subdirectories and playable tracks of a folder.
//!
//! The scanner is deliberately shallow (one directory at a time) because the
//! UI browses the tree folder by folder.

mod display;
mod model;
mod scan;

pub use display::format_mss;
pub use model::Track;
pub use scan::{list_dirs, list_tracks};

#[cfg(test)]
mod tests;
