//! Source-image loading and upload.
//!
//! Decoding happens on a background thread; the render loop polls for the
//! result once per frame and swaps the 1x1 placeholder for the real
//! texture when it arrives. A failed decode is logged and leaves the
//! placeholder in place indefinitely.

mod loader;
mod source;

pub use loader::ImageLoader;
pub use source::SourceImage;
