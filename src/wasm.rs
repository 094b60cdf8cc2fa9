//! WebAssembly exports for the filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//! Every export takes a flat RGBA byte array (length = width * height * 4)
//! and returns a new flat array of the same length. Invalid input or
//! parameters are thrown as JS errors.

use wasm_bindgen::prelude::*;

use crate::filters::Filter;
use crate::raster::RasterImage;

fn run(data: &[u8], width: usize, height: usize, filter: Filter) -> Result<Vec<u8>, JsValue> {
    let input = RasterImage::from_rgba_bytes(width, height, data.to_vec())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let result = filter
        .apply(&input)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(result.into_array().into_raw_vec_and_offset().0)
}

/// Invert RGB, alpha preserved.
#[wasm_bindgen]
pub fn invert_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, Filter::Invert)
}

/// Desaturate to gray, alpha preserved.
#[wasm_bindgen]
pub fn grayscale_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, Filter::Grayscale)
}

/// Gaussian blur with radius in [0, 25].
#[wasm_bindgen]
pub fn gaussian_blur_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    radius: f32,
) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, Filter::Blur { radius })
}

/// 3x3 sharpen with the given strength.
#[wasm_bindgen]
pub fn sharpen_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    strength: f32,
) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, Filter::Sharpen { strength })
}

/// R <- B, G <- R, B <- G
#[wasm_bindgen]
pub fn gbr_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, Filter::Gbr)
}

/// R <- G, G <- B, B <- R
#[wasm_bindgen]
pub fn brg_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, Filter::Brg)
}
