//! Frame timing.
//!
//! Intended usage:
//! - one `Clock` per game loop
//! - call `tick(framerate)` once per frame to get the milliseconds since the last frame
//! - read `get_fps()` for a smoothed frame rate over the last ten frames

mod clock;

pub use clock::{Clock, SystemTimeSource, TimeSource, SAMPLE_COUNT};
