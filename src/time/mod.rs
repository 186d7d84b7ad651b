//! Frame timing.
//!
//! One `FrameClock` per render loop; `tick()` once per presented frame.
//! The clock is plain data, so tests can step it directly instead of
//! depending on a display refresh callback.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
