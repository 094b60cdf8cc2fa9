//! Core utilities shared by the spatial filters.
//!
//! - Gaussian kernel generation
//! - Replicate-clamp neighbour lookup
//! - Row-parallel output allocation
//! - Float to u8 channel rounding

use ndarray::Array3;
use rayon::prelude::*;

use crate::error::{FilterError, FilterResult};
use crate::raster::CHANNELS;

/// Standard deviation used for a given blur radius.
///
/// Follows the platform blur convention: `sigma = 0.4 * radius + 0.6`.
pub fn blur_sigma(radius: f32) -> f32 {
    0.4 * radius + 0.6
}

/// Generate a normalized 1D Gaussian kernel for a blur radius.
///
/// The kernel has `2 * ceil(radius) + 1` taps. Radius 0 yields the
/// single-tap identity kernel `[1.0]`.
///
/// # Arguments
/// * `radius` - Blur radius, expected in `[0, 25]`
///
/// # Returns
/// Normalized 1D kernel as Vec<f32>
pub fn gaussian_kernel_1d(radius: f32) -> Vec<f32> {
    if radius <= 0.0 {
        return vec![1.0];
    }

    let half = radius.ceil() as usize;
    let sigma = blur_sigma(radius);
    let denom = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..=2 * half)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / denom).exp()
        })
        .collect();

    // Normalize
    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Offset `pos` by `delta`, replicating the edge pixel when out of range.
#[inline]
pub fn clamp_index(pos: usize, delta: isize, len: usize) -> usize {
    (pos as isize + delta).clamp(0, len as isize - 1) as usize
}

/// Round and clamp a float channel value into u8.
#[inline]
pub fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Allocate a `(height, width, 4)` image and fill it row by row in parallel.
///
/// `fill_row(y, row)` receives the output row as a flat RGBA slice of
/// `width * 4` bytes. Rows are independent, so the result does not depend
/// on scheduling. Callers pass dimensions of an already validated image.
pub fn par_rows<F>(height: usize, width: usize, fill_row: F) -> FilterResult<Array3<u8>>
where
    F: Fn(usize, &mut [u8]) + Sync + Send,
{
    let mut flat = vec![0u8; height * width * CHANNELS];
    flat.par_chunks_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row));

    Array3::from_shape_vec((height, width, CHANNELS), flat)
        .map_err(|e| FilterError::image_data(e.to_string()))
}

/// Float counterpart of [`par_rows`], used for intermediate passes.
pub fn par_rows_f32<F>(height: usize, width: usize, fill_row: F) -> FilterResult<Array3<f32>>
where
    F: Fn(usize, &mut [f32]) + Sync + Send,
{
    let mut flat = vec![0f32; height * width * CHANNELS];
    flat.par_chunks_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row));

    Array3::from_shape_vec((height, width, CHANNELS), flat)
        .map_err(|e| FilterError::image_data(e.to_string()))
}
