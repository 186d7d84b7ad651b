//! Displacement-field domain.
//!
//! The field is a surface-sized texture whose R/G channels encode a
//! per-pixel X/Y displacement in [-1, 1], stored biased into [0, 1].
//! `targets` owns the ping-pong render-target pair; `decay` is the CPU
//! model of the per-frame fade step applied by `render/shaders/fade.wgsl`.

pub mod decay;

mod targets;

pub use targets::{FIELD_FORMAT, FieldTargets, NEUTRAL_CLEAR};
