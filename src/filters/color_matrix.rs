//! 4x5 affine color matrix.
//!
//! Each row computes one output channel from the input `(r, g, b, a)` plus a
//! constant offset:
//!
//! ```text
//! R' = m[0]*R + m[1]*G + m[2]*B + m[3]*A + m[4]
//! G' = m[5]*R + ...
//! ```
//!
//! Offsets are in the 0-255 channel scale. Results are rounded and clamped.

use ndarray::{Array3, ArrayView3};

use super::core::to_channel;

/// Desaturation weights for the zero-saturation matrix.
pub const GRAY_R: f32 = 0.213;
pub const GRAY_G: f32 = 0.715;
pub const GRAY_B: f32 = 0.072;

/// Row-major 4x5 color transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [f32; 20]);

impl ColorMatrix {
    pub const IDENTITY: ColorMatrix = ColorMatrix([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// Negate RGB and shift back into range; alpha untouched.
    pub const INVERT: ColorMatrix = ColorMatrix([
        -1.0, 0.0, 0.0, 0.0, 255.0, //
        0.0, -1.0, 0.0, 0.0, 255.0, //
        0.0, 0.0, -1.0, 0.0, 255.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// R <- B, G <- R, B <- G
    pub const GBR: ColorMatrix = ColorMatrix([
        0.0, 0.0, 1.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// R <- G, G <- B, B <- R
    pub const BRG: ColorMatrix = ColorMatrix([
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// Saturation matrix. `s = 1` is the identity, `s = 0` full grayscale.
    pub fn saturation(s: f32) -> ColorMatrix {
        let inv = 1.0 - s;
        let r = GRAY_R * inv;
        let g = GRAY_G * inv;
        let b = GRAY_B * inv;
        ColorMatrix([
            r + s, g, b, 0.0, 0.0, //
            r, g + s, b, 0.0, 0.0, //
            r, g, b + s, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Transform one pixel.
    #[inline]
    pub fn apply_pixel(&self, px: [u8; 4]) -> [u8; 4] {
        let m = &self.0;
        let [r, g, b, a] = px.map(f32::from);
        let mut out = [0u8; 4];
        for (row, o) in out.iter_mut().enumerate() {
            let k = row * 5;
            *o = to_channel(m[k] * r + m[k + 1] * g + m[k + 2] * b + m[k + 3] * a + m[k + 4]);
        }
        out
    }

    /// Transform every pixel of an RGBA image.
    ///
    /// # Arguments
    /// * `input` - RGBA image (height, width, 4), already validated
    ///
    /// # Returns
    /// New image with the same dimensions
    pub fn apply_u8(&self, input: ArrayView3<u8>) -> Array3<u8> {
        let (height, width, _) = input.dim();
        let mut output = Array3::<u8>::zeros((height, width, 4));

        for y in 0..height {
            for x in 0..width {
                let px = [
                    input[[y, x, 0]],
                    input[[y, x, 1]],
                    input[[y, x, 2]],
                    input[[y, x, 3]],
                ];
                let out = self.apply_pixel(px);
                for c in 0..4 {
                    output[[y, x, c]] = out[c];
                }
            }
        }

        output
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let px = [12, 200, 77, 31];
        assert_eq!(ColorMatrix::IDENTITY.apply_pixel(px), px);
        assert_eq!(ColorMatrix::saturation(1.0).apply_pixel(px), px);
    }

    #[test]
    fn test_invert_pixel() {
        assert_eq!(ColorMatrix::INVERT.apply_pixel([255, 0, 10, 128]), [0, 255, 245, 128]);
    }

    #[test]
    fn test_permutations() {
        let px = [10, 20, 30, 40];
        assert_eq!(ColorMatrix::GBR.apply_pixel(px), [30, 10, 20, 40]);
        assert_eq!(ColorMatrix::BRG.apply_pixel(px), [20, 30, 10, 40]);
    }

    #[test]
    fn test_zero_saturation_rows_equal() {
        let m = ColorMatrix::saturation(0.0);
        assert_eq!(&m.0[0..3], &m.0[5..8]);
        assert_eq!(&m.0[5..8], &m.0[10..13]);
        assert_eq!(m.apply_pixel([255, 0, 0, 255]), [54, 54, 54, 255]);
    }

    #[test]
    fn test_offsets_clamp() {
        let brighten = ColorMatrix([
            1.0, 0.0, 0.0, 0.0, 100.0, //
            0.0, 1.0, 0.0, 0.0, -100.0, //
            0.0, 0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ]);
        assert_eq!(brighten.apply_pixel([200, 50, 5, 255]), [255, 0, 5, 255]);
    }
}
