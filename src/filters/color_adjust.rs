//! Color adjustment filters: Invert and the RGB channel rotations.
//!
//! These are pixel-wise operations that don't require spatial context.
//! Each one applies a fixed [`ColorMatrix`]; alpha is always preserved.

use ndarray::{Array3, ArrayView3};

use super::color_matrix::ColorMatrix;
use crate::error::FilterResult;
use crate::raster::validate_rgba;

// ============================================================================
// Invert
// ============================================================================

/// Invert image colors.
///
/// Output is `(255 - r, 255 - g, 255 - b, a)`. Applying it twice returns the
/// input exactly.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
///
/// # Returns
/// Color-inverted image, or `InvalidImageData` for a malformed input
pub fn invert_u8(input: ArrayView3<u8>) -> FilterResult<Array3<u8>> {
    validate_rgba(input)?;
    Ok(ColorMatrix::INVERT.apply_u8(input))
}

// ============================================================================
// Channel rotations
// ============================================================================

/// Rotate channels so that `(r, g, b) <- (b, r, g)`.
///
/// Inverse of [`brg_u8`].
pub fn gbr_u8(input: ArrayView3<u8>) -> FilterResult<Array3<u8>> {
    validate_rgba(input)?;
    Ok(ColorMatrix::GBR.apply_u8(input))
}

/// Rotate channels so that `(r, g, b) <- (g, b, r)`.
///
/// Inverse of [`gbr_u8`].
pub fn brg_u8(input: ArrayView3<u8>) -> FilterResult<Array3<u8>> {
    validate_rgba(input)?;
    Ok(ColorMatrix::BRG.apply_u8(input))
}
