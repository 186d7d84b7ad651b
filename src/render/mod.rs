//! GPU rendering subsystem.
//!
//! One renderer struct per pipeline, each owning its GPU resources and
//! building them lazily on first use:
//! - `BrushRenderer` stamps a solid-color transformed quad into the field.
//! - `FadeRenderer` copies front -> back while decaying toward neutral.
//! - `DisplaceRenderer` warps the source image onto the surface using the
//!   field as a per-pixel UV offset.
//!
//! Convention: pixel-space geometry uses a top-left-origin orthographic
//! projection built in `transform`; shaders live under `render/shaders/`.

mod brush;
mod ctx;
mod displace;
mod fade;
mod quad;

pub mod transform;

pub use brush::BrushRenderer;
pub use ctx::{RenderCtx, RenderTarget};
pub use displace::DisplaceRenderer;
pub use fade::FadeRenderer;
pub use quad::QuadMesh;
