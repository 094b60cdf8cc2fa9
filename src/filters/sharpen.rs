//! Sharpen filter.
//!
//! 3x3 convolution with strength `s`:
//!
//! ```text
//!  0  -s   0
//! -s  5s  -s
//!  0  -s   0
//! ```
//!
//! The kernel is not normalized; with `s = 1` it sums to 1 and flat regions
//! are preserved. Neighbours outside the image replicate the edge pixel.
//! Only RGB is convolved. Alpha is copied from the source pixel.

use ndarray::{Array3, ArrayView3};
use tracing::debug;

use super::core::{clamp_index, par_rows, to_channel};
use crate::error::{FilterError, FilterResult};
use crate::raster::{validate_rgba, CHANNELS};

/// Build the 3x3 sharpening kernel for `strength`, row-major.
pub fn sharpen_kernel(strength: f32) -> [f32; 9] {
    let s = strength;
    [
        0.0, -s, 0.0, //
        -s, 5.0 * s, -s, //
        0.0, -s, 0.0,
    ]
}

/// Apply sharpening filter.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `strength` - Sharpening strength, any finite value (1.0 = standard)
///
/// # Returns
/// Sharpened image with same dimensions and untouched alpha
pub fn sharpen_u8(input: ArrayView3<u8>, strength: f32) -> FilterResult<Array3<u8>> {
    let (height, width) = validate_rgba(input)?;
    // Largest possible |sum|: 255 * (5 + 4) * |s|; it must stay finite
    if !(255.0 * 9.0 * strength).is_finite() {
        return Err(FilterError::parameter(
            "strength",
            strength,
            "must be finite and small enough for the kernel sums to stay finite",
        ));
    }

    let kernel = sharpen_kernel(strength);
    debug!(strength, width, height, "sharpen");

    let output = par_rows(height, width, |y, row| {
        for x in 0..width {
            for c in 0..3 {
                let mut sum = 0.0f32;
                for ky in 0..3 {
                    let sy = clamp_index(y, ky as isize - 1, height);
                    for kx in 0..3 {
                        let weight = kernel[ky * 3 + kx];
                        if weight == 0.0 {
                            continue;
                        }
                        let sx = clamp_index(x, kx as isize - 1, width);
                        sum += input[[sy, sx, c]] as f32 * weight;
                    }
                }
                row[x * CHANNELS + c] = to_channel(sum);
            }
            row[x * CHANNELS + 3] = input[[y, x, 3]];
        }
    })?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_kernel_layout() {
        let k = sharpen_kernel(2.0);
        assert_eq!(k[4], 10.0);
        assert_eq!([k[1], k[3], k[5], k[7]], [-2.0; 4]);
        assert_eq!([k[0], k[2], k[6], k[8]], [0.0; 4]);
    }

    #[test]
    fn test_sharpen_preserves_flat() {
        // A flat color image stays the same at unit strength
        let mut img = Array3::<u8>::zeros((3, 3, 4));
        for y in 0..3 {
            for x in 0..3 {
                img[[y, x, 0]] = 128;
                img[[y, x, 1]] = 128;
                img[[y, x, 2]] = 128;
                img[[y, x, 3]] = 255;
            }
        }

        let result = sharpen_u8(img.view(), 1.0).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_sharpen_enhances_edge() {
        // Bright column in the middle of a dark image
        let mut img = Array3::<u8>::zeros((3, 3, 4));
        for y in 0..3 {
            for x in 0..3 {
                img[[y, x, 0]] = if x == 1 { 200 } else { 50 };
                img[[y, x, 3]] = 255;
            }
        }

        let result = sharpen_u8(img.view(), 1.0).unwrap();

        // center: 5*200 - 200 - 200 - 50 - 50 = 500 -> 255
        assert_eq!(result[[1, 1, 0]], 255);
        // left: 5*50 - 50(top) - 50(bottom) - 50(clamped left) - 200 = -100 -> 0
        assert_eq!(result[[1, 0, 0]], 0);
    }

    #[test]
    fn test_sharpen_clamped_boundary() {
        // Two-pixel image: each pixel treats its own value as the far neighbour
        let img = Array3::from_shape_vec((1, 2, 4), vec![100, 0, 0, 255, 110, 0, 0, 255]).unwrap();
        let result = sharpen_u8(img.view(), 1.0).unwrap();
        // left: 5*100 - 100(up) - 100(down) - 100(left) - 110 = 90
        assert_eq!(result[[0, 0, 0]], 90);
        // right: 5*110 - 110 - 110 - 100 - 110 = 120
        assert_eq!(result[[0, 1, 0]], 120);
    }

    #[test]
    fn test_sharpen_copies_alpha() {
        let img = Array3::from_shape_fn((4, 4, 4), |(y, x, c)| {
            if c == 3 {
                (y * 60 + x) as u8
            } else {
                ((x * 70) % 256) as u8
            }
        });
        let result = sharpen_u8(img.view(), 3.0).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(result[[y, x, 3]], img[[y, x, 3]]);
            }
        }
    }

    #[test]
    fn test_sharpen_zero_strength_blacks_out_rgb() {
        let img = Array3::<u8>::from_elem((2, 2, 4), 90);
        let result = sharpen_u8(img.view(), 0.0).unwrap();
        assert_eq!(result[[0, 0, 0]], 0);
        assert_eq!(result[[0, 0, 3]], 90);
    }

    #[test]
    fn test_sharpen_rejects_non_finite() {
        let img = Array3::<u8>::zeros((2, 2, 4));
        assert!(matches!(
            sharpen_u8(img.view(), f32::NAN),
            Err(FilterError::InvalidParameter { name: "strength", .. })
        ));
    }

    #[test]
    fn test_sharpen_rejects_overflowing_strength() {
        let img = Array3::<u8>::from_elem((2, 2, 4), 90);
        for strength in [1e38f32, -1e38] {
            assert!(matches!(
                sharpen_u8(img.view(), strength),
                Err(FilterError::InvalidParameter { name: "strength", .. })
            ));
        }
        // Large but representable strengths still work
        assert!(sharpen_u8(img.view(), 1e30).is_ok());
    }
}
