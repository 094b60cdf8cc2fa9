//! Gaussian blur for RGBA images.
//!
//! Separable two-pass convolution (horizontal, then vertical) with
//! replicate-clamp edges. All four channels are blurred. Rows of each pass
//! are computed in parallel with rayon.

use ndarray::{Array3, ArrayView3};
use tracing::debug;

use super::core::{
    blur_sigma, clamp_index, gaussian_kernel_1d, par_rows, par_rows_f32, to_channel,
};
use crate::config::{RadiusPolicy, MAX_BLUR_RADIUS};
use crate::error::{FilterError, FilterResult};
use crate::raster::{validate_rgba, CHANNELS};

/// Check a blur radius against `[0, MAX_BLUR_RADIUS]`.
pub fn validate_radius(radius: f32) -> FilterResult<f32> {
    if radius.is_nan() || !(0.0..=MAX_BLUR_RADIUS).contains(&radius) {
        return Err(FilterError::parameter(
            "radius",
            radius,
            format!("must be within [0, {}]", MAX_BLUR_RADIUS),
        ));
    }
    Ok(radius)
}

/// Apply Gaussian blur to an RGBA image.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `radius` - Blur radius in `[0, 25]`; 0 returns an exact copy
///
/// # Returns
/// Blurred image with same dimensions. `InvalidParameter` if the radius is
/// out of range, `InvalidImageData` for a malformed input.
pub fn gaussian_blur_u8(input: ArrayView3<u8>, radius: f32) -> FilterResult<Array3<u8>> {
    gaussian_blur_with_policy(input, radius, RadiusPolicy::Reject)
}

/// [`gaussian_blur_u8`] with an explicit out-of-range policy.
pub fn gaussian_blur_with_policy(
    input: ArrayView3<u8>,
    radius: f32,
    policy: RadiusPolicy,
) -> FilterResult<Array3<u8>> {
    let (height, width) = validate_rgba(input)?;
    let resolved = policy.resolve(radius);
    if resolved != radius && !(resolved.is_nan() && radius.is_nan()) {
        debug!(requested = radius, clamped = resolved, "blur radius clamped");
    }
    let radius = validate_radius(resolved)?;

    if radius == 0.0 {
        return Ok(input.to_owned());
    }

    let kernel = gaussian_kernel_1d(radius);
    let half = (kernel.len() / 2) as isize;
    debug!(
        radius,
        sigma = blur_sigma(radius),
        taps = kernel.len(),
        width,
        height,
        "gaussian blur"
    );

    // Horizontal pass, kept in f32 for precision
    let temp = par_rows_f32(height, width, |y, row| {
        for x in 0..width {
            for c in 0..CHANNELS {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let sx = clamp_index(x, ki as isize - half, width);
                    sum += input[[y, sx, c]] as f32 * kv;
                }
                row[x * CHANNELS + c] = sum;
            }
        }
    })?;

    // Vertical pass
    let output = par_rows(height, width, |y, row| {
        for x in 0..width {
            for c in 0..CHANNELS {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let sy = clamp_index(y, ki as isize - half, height);
                    sum += temp[[sy, x, c]] * kv;
                }
                row[x * CHANNELS + c] = to_channel(sum);
            }
        }
    })?;

    Ok(output)
}
