//! Application module: the state behind the browser and the player view.

mod model;

pub use model::*;
