//! Smudge: an interactive GPU liquify effect.
//!
//! A displacement field, stored in a ping-pong pair of offscreen targets,
//! is faded toward neutral every frame and perturbed by mouse-driven brush
//! stamps, then used to warp a source image onto the window surface.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod field;
pub mod render;
pub mod assets;

pub mod app;
pub mod config;
