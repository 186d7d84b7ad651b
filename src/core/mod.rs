//! Contract between the platform runtime and the effect.
//!
//! The runtime owns the window and GPU; the application receives raw
//! window events plus one `FrameCtx` per redraw and never touches the
//! event loop directly.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
