//! Pointer input: inverse-projection mapping and brush-stroke state.
//!
//! The runtime forwards raw window events; this module turns a cursor
//! position into a brush stroke placed in displacement-field pixels,
//! regardless of where the composite transform put the image on screen.

mod mapper;
mod stroke;

pub use mapper::pointer_to_field;
pub use stroke::{BrushStroke, StrokeParams, StrokeSlot};
