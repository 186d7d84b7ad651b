//! GPU device + surface management.
//!
//! Owns the wgpu device/queue and the window surface (swapchain):
//! creation, resize, frame acquisition, and surface-error triage.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
