//! Tessel engine crate.
//!
//! Value types and timing utilities for a 2D game toolkit: vector math in
//! [`coords`], frame timing in [`time`], logger setup in [`logging`].

pub mod coords;
pub mod error;
pub mod logging;
pub mod time;

pub use error::{VectorError, VectorResult};
