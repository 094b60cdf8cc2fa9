//! Pixel transform library.
//!
//! ## Image Format
//!
//! Every filter takes an RGBA u8 image as an `ArrayView3<u8>` of shape
//! `(height, width, 4)` and returns a newly allocated `Array3<u8>` of the
//! same shape. Inputs with another channel count or a zero dimension are
//! rejected with `InvalidImageData`.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Pure** - no shared state, identical input gives identical output
//! - **Non-destructive** - the input view is never written
//! - **Clamped** - channel math runs in f32, then rounds and clamps to 0-255
//! - **Replicate edges** - spatial filters read out-of-bounds neighbours
//!   from the nearest edge pixel
//!
//! ## Filter Categories
//!
//! - **Point (color matrix)**: invert, grayscale, gbr, brg
//! - **Spatial (convolution)**: gaussian blur, sharpen

pub mod core;
pub mod color_matrix;
pub mod color_adjust;
pub mod grayscale;
pub mod blur;
pub mod sharpen;
pub mod kind;

pub use kind::Filter;
