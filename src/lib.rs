//! imagefilters
//!
//! Deterministic RGBA image filters plus a filter session that tracks the
//! original image against the currently displayed, filtered one.
//!
//! ## Image Format
//! Images are RGBA, 8 bits per channel, stored as `(height, width, 4)`
//! arrays. [`RasterImage`] wraps such an array after validating it and is
//! immutable from then on.
//!
//! ## Filters
//! - **Invert**, **Grayscale**, **GBR** and **BRG** are color matrices
//!   applied per pixel.
//! - **Gaussian blur** (radius 0-25) and **Sharpen** are convolutions with
//!   replicate-clamp edges.
//!
//! ## Sessions
//! [`FilterSession`] applies filters one after another on the current image,
//! can reset to the original, and pushes every new image to an optional
//! [`DisplaySink`].
//!
//! ```
//! use imagefilters::{Filter, FilterSession, RasterImage};
//!
//! let red = RasterImage::filled(2, 2, [255, 0, 0, 255]).unwrap();
//! let mut session = FilterSession::new(red.clone());
//!
//! let inverted = session.apply_filter(Filter::Invert).unwrap();
//! assert_eq!(inverted.pixel(0, 0), Some([0, 255, 255, 255]));
//!
//! assert_eq!(session.clear_filters(), red);
//! ```
//!
//! ## Bindings
//! Optional Cargo features expose the filters to Python (`python`, via PyO3
//! and numpy) and JavaScript (`wasm`, via wasm-bindgen).

pub mod config;
pub mod error;
pub mod filters;
pub mod raster;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{FilterConfig, RadiusPolicy, MAX_BLUR_RADIUS};
pub use error::{FilterError, FilterResult};
pub use filters::Filter;
pub use raster::RasterImage;
pub use session::{DisplaySink, FilterSession, PersistenceSink, SessionState};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::FilterError;
    use crate::filters::Filter;
    use crate::raster::RasterImage;
    use crate::session::FilterSession;

    fn to_py_err(err: FilterError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn to_raster(image: PyReadonlyArray3<'_, u8>) -> PyResult<RasterImage> {
        RasterImage::from_array(image.as_array().to_owned()).map_err(to_py_err)
    }

    fn run<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        filter: Filter,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_raster(image)?;
        let output = filter.apply(&input).map_err(to_py_err)?;
        Ok(output.into_array().into_pyarray(py))
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Invert RGB channels of an RGBA u8 image, alpha preserved.
    #[pyfunction]
    pub fn invert_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, Filter::Invert)
    }

    /// Desaturate an RGBA u8 image. Output has R=G=B, alpha preserved.
    #[pyfunction]
    pub fn grayscale_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, Filter::Grayscale)
    }

    /// Gaussian blur with radius in [0, 25].
    #[pyfunction]
    #[pyo3(signature = (image, radius=25.0))]
    pub fn gaussian_blur_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        radius: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, Filter::Blur { radius })
    }

    /// 3x3 sharpen (center 5s, orthogonal neighbours -s).
    #[pyfunction]
    #[pyo3(signature = (image, strength=1.0))]
    pub fn sharpen_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        strength: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, Filter::Sharpen { strength })
    }

    /// Rotate channels: R <- B, G <- R, B <- G.
    #[pyfunction]
    pub fn gbr_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, Filter::Gbr)
    }

    /// Rotate channels: R <- G, G <- B, B <- R.
    #[pyfunction]
    pub fn brg_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, Filter::Brg)
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Original/current image pair with apply and clear.
    #[pyclass(name = "FilterSession", unsendable)]
    pub struct PyFilterSession {
        inner: FilterSession,
    }

    #[pymethods]
    impl PyFilterSession {
        #[new]
        fn new<'py>(image: PyReadonlyArray3<'py, u8>) -> PyResult<Self> {
            Ok(Self {
                inner: FilterSession::new(to_raster(image)?),
            })
        }

        /// Apply a filter by name, e.g. "invert" or "blur:10".
        fn apply<'py>(
            &mut self,
            py: Python<'py>,
            spec: &str,
        ) -> PyResult<Bound<'py, PyArray3<u8>>> {
            let image = self.inner.apply_named(spec).map_err(to_py_err)?;
            Ok(image.into_array().into_pyarray(py))
        }

        fn clear<'py>(&mut self, py: Python<'py>) -> Bound<'py, PyArray3<u8>> {
            self.inner.clear_filters().into_array().into_pyarray(py)
        }

        fn load<'py>(&mut self, image: PyReadonlyArray3<'py, u8>) -> PyResult<()> {
            self.inner.load_source(to_raster(image)?);
            Ok(())
        }

        fn current<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<u8>> {
            self.inner.current().clone().into_array().into_pyarray(py)
        }

        fn original<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<u8>> {
            self.inner.original().clone().into_array().into_pyarray(py)
        }

        #[getter]
        fn is_filtered(&self) -> bool {
            self.inner.is_filtered()
        }

        #[getter]
        fn applied(&self) -> Vec<String> {
            self.inner.applied().iter().map(|f| f.to_string()).collect()
        }
    }

    #[pymodule]
    pub fn imagefilters(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(invert_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(grayscale_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(gaussian_blur_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(sharpen_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(gbr_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(brg_rgba, m)?)?;
        m.add_class::<PyFilterSession>()?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::imagefilters;
