//! Immutable RGBA raster image.
//!
//! Pixels are stored as an `ndarray` of shape `(height, width, 4)`, the same
//! layout every filter in [`crate::filters`] works on. The buffer sits behind
//! an `Arc`: cloning a raster is cheap and never copies pixels, and nothing
//! can mutate a raster once it has been built.

use std::sync::Arc;

use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, FilterResult};

/// Channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A validated RGBA u8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    data: Arc<Array3<u8>>,
}

impl RasterImage {
    /// Build from a flat row-major RGBA byte buffer.
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: Vec<u8>) -> FilterResult<Self> {
        let expected = check_dimensions(width, height)? * CHANNELS;
        if bytes.len() != expected {
            return Err(FilterError::image_data(format!(
                "{}x{} RGBA needs {} bytes, got {}",
                width,
                height,
                expected,
                bytes.len()
            )));
        }
        let data = Array3::from_shape_vec((height, width, CHANNELS), bytes)
            .map_err(|e| FilterError::image_data(e.to_string()))?;
        Ok(Self::from_validated(data))
    }

    /// Build from a row-major sequence of `[r, g, b, a]` pixels.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<[u8; 4]>) -> FilterResult<Self> {
        let expected = check_dimensions(width, height)?;
        if pixels.len() != expected {
            return Err(FilterError::image_data(format!(
                "{}x{} raster needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        let bytes = pixels.into_iter().flatten().collect();
        Self::from_rgba_bytes(width, height, bytes)
    }

    /// Wrap an existing `(height, width, 4)` array.
    ///
    /// Arrays that are not in row-major order are copied into it.
    pub fn from_array(data: Array3<u8>) -> FilterResult<Self> {
        validate_rgba(data.view())?;
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Ok(Self::from_validated(data))
    }

    /// A raster where every pixel is `pixel`.
    pub fn filled(width: usize, height: usize, pixel: [u8; 4]) -> FilterResult<Self> {
        check_dimensions(width, height)?;
        let data = Array3::from_shape_fn((height, width, CHANNELS), |(_, _, c)| pixel[c]);
        Ok(Self::from_validated(data))
    }

    /// Callers must have checked the shape with [`validate_rgba`].
    pub(crate) fn from_validated(data: Array3<u8>) -> Self {
        debug_assert!(validate_rgba(data.view()).is_ok());
        Self {
            data: Arc::new(data),
        }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Pixel at column `x`, row `y`, or `None` outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let d = &self.data;
        Some([d[[y, x, 0]], d[[y, x, 1]], d[[y, x, 2]], d[[y, x, 3]]])
    }

    /// Row-major pixel iterator.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        let (height, width, _) = self.data.dim();
        let d = &self.data;
        (0..height).flat_map(move |y| {
            (0..width).map(move |x| [d[[y, x, 0]], d[[y, x, 1]], d[[y, x, 2]], d[[y, x, 3]]])
        })
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Flat row-major RGBA bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }

    /// Take the pixel array, copying only if the buffer is still shared.
    pub fn into_array(self) -> Array3<u8> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    /// True when both rasters share one pixel buffer.
    pub fn ptr_eq(&self, other: &RasterImage) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

/// Returns the pixel count. Its RGBA byte length is known to fit in `usize`.
fn check_dimensions(width: usize, height: usize) -> FilterResult<usize> {
    if width == 0 || height == 0 {
        return Err(FilterError::image_data(format!(
            "dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    width
        .checked_mul(height)
        .filter(|n| n.checked_mul(CHANNELS).is_some())
        .ok_or_else(|| {
            FilterError::image_data(format!("{}x{} RGBA raster is too large", width, height))
        })
}

/// Check that `input` is a non-empty `(height, width, 4)` image.
///
/// # Returns
/// `(height, width)` of the image
pub fn validate_rgba(input: ArrayView3<u8>) -> FilterResult<(usize, usize)> {
    let (height, width, channels) = input.dim();
    if channels != CHANNELS {
        return Err(FilterError::image_data(format!(
            "expected {} channels (RGBA), got {}",
            CHANNELS, channels
        )));
    }
    check_dimensions(width, height)?;
    Ok((height, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_bytes() {
        let img = RasterImage::from_rgba_bytes(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.pixel(0, 0), Some([1, 2, 3, 4]));
        assert_eq!(img.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(img.pixel(2, 0), None);
    }

    #[test]
    fn test_length_mismatch_is_invalid_image_data() {
        let err = RasterImage::from_rgba_bytes(2, 2, vec![0; 12]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidImageData { .. }));

        let err = RasterImage::from_pixels(3, 1, vec![[0; 4]; 2]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidImageData { .. }));
    }

    #[test]
    fn test_oversized_dimensions_are_invalid_image_data() {
        let huge = usize::MAX / 2;
        assert!(matches!(
            RasterImage::from_rgba_bytes(huge, 3, vec![]),
            Err(FilterError::InvalidImageData { .. })
        ));
        assert!(matches!(
            RasterImage::from_pixels(huge, 3, vec![]),
            Err(FilterError::InvalidImageData { .. })
        ));
        assert!(matches!(
            RasterImage::filled(3, huge, [0; 4]),
            Err(FilterError::InvalidImageData { .. })
        ));
        // Pixel count fits, byte count does not
        assert!(RasterImage::from_rgba_bytes(usize::MAX / 4 + 1, 1, vec![]).is_err());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(RasterImage::from_rgba_bytes(0, 4, vec![]).is_err());
        assert!(RasterImage::filled(4, 0, [0; 4]).is_err());
    }

    #[test]
    fn test_from_array_requires_four_channels() {
        let err = RasterImage::from_array(Array3::<u8>::zeros((2, 2, 3))).unwrap_err();
        assert!(matches!(err, FilterError::InvalidImageData { .. }));
        assert!(RasterImage::from_array(Array3::<u8>::zeros((2, 2, 4))).is_ok());
    }

    #[test]
    fn test_row_major_order() {
        let pixels = vec![[1, 0, 0, 255], [2, 0, 0, 255], [3, 0, 0, 255], [4, 0, 0, 255]];
        let img = RasterImage::from_pixels(2, 2, pixels.clone()).unwrap();
        assert_eq!(img.pixel(1, 0), Some([2, 0, 0, 255]));
        assert_eq!(img.pixel(0, 1), Some([3, 0, 0, 255]));
        assert_eq!(img.pixels().collect::<Vec<_>>(), pixels);
        assert_eq!(img.to_rgba_bytes().len(), 16);
    }

    #[test]
    fn test_clone_shares_buffer() {
        let img = RasterImage::filled(3, 3, [9, 9, 9, 9]).unwrap();
        let copy = img.clone();
        assert!(img.ptr_eq(&copy));
        assert_eq!(img, copy);

        let array = copy.into_array();
        assert_eq!(array.dim(), (3, 3, 4));
        assert_eq!(img.pixel(2, 2), Some([9, 9, 9, 9]));
    }
}
