//! Grayscale conversion filter.
//!
//! Applies the zero-saturation color matrix, so every color channel becomes
//! `0.213 R + 0.715 G + 0.072 B`. The weights sum to 1, which keeps gray
//! pixels fixed and makes the filter idempotent.

use ndarray::{Array3, ArrayView3};

use super::color_matrix::ColorMatrix;
use crate::error::FilterResult;
use crate::raster::validate_rgba;

/// Convert an RGBA u8 image to grayscale.
///
/// Output is RGBA with R=G=B=luminance, A preserved.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
///
/// # Returns
/// New image with gray values in RGB channels
pub fn grayscale_rgba_u8(input: ArrayView3<u8>) -> FilterResult<Array3<u8>> {
    validate_rgba(input)?;
    Ok(ColorMatrix::saturation(0.0).apply_u8(input))
}
