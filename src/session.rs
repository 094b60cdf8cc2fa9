//! Filter session: the original image, the image currently on display, and
//! the apply/clear state machine between them.
//!
//! ```text
//!            apply_filter            apply_filter
//! Unfiltered ------------> Filtered <------------+
//!     ^                       |                  |
//!     +---- clear_filters ----+------------------+
//! ```
//!
//! Filters compose: each one runs on the previous result. There is no undo
//! beyond [`FilterSession::clear_filters`]. A failed apply changes nothing.

use std::fmt;

use tracing::{info, warn};

use crate::config::FilterConfig;
use crate::error::FilterResult;
use crate::filters::Filter;
use crate::raster::RasterImage;

/// Receives every raster the session wants displayed.
pub trait DisplaySink: Send {
    fn show(&mut self, image: &RasterImage);
}

impl<F> DisplaySink for F
where
    F: FnMut(&RasterImage) + Send,
{
    fn show(&mut self, image: &RasterImage) {
        self(image)
    }
}

/// Stores a finished raster somewhere (gallery, file, upload).
pub trait PersistenceSink {
    type Error;

    fn persist(&mut self, image: &RasterImage) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// `current` is the original.
    Unfiltered,
    /// At least one filter has been applied since the last reset.
    Filtered,
}

pub struct FilterSession {
    original: RasterImage,
    current: RasterImage,
    applied: Vec<Filter>,
    config: FilterConfig,
    display: Option<Box<dyn DisplaySink>>,
}

impl FilterSession {
    pub fn new(original: RasterImage) -> Self {
        Self::with_config(original, FilterConfig::default())
    }

    pub fn with_config(original: RasterImage, config: FilterConfig) -> Self {
        Self {
            current: original.clone(),
            original,
            applied: Vec::new(),
            config,
            display: None,
        }
    }

    /// Attach a display sink and show the current image on it.
    pub fn with_display(mut self, sink: impl DisplaySink + 'static) -> Self {
        self.set_display(sink);
        self
    }

    pub fn set_display(&mut self, sink: impl DisplaySink + 'static) {
        let mut sink: Box<dyn DisplaySink> = Box::new(sink);
        sink.show(&self.current);
        self.display = Some(sink);
    }

    pub fn clear_display(&mut self) {
        self.display = None;
    }

    pub fn original(&self) -> &RasterImage {
        &self.original
    }

    pub fn current(&self) -> &RasterImage {
        &self.current
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Filters applied since the last clear or load, oldest first.
    pub fn applied(&self) -> &[Filter] {
        &self.applied
    }

    pub fn state(&self) -> SessionState {
        if self.applied.is_empty() {
            SessionState::Unfiltered
        } else {
            SessionState::Filtered
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.state() == SessionState::Filtered
    }

    /// Run `filter` on the current image and make the result current.
    ///
    /// On error the session is left exactly as it was and nothing is shown.
    pub fn apply_filter(&mut self, filter: Filter) -> FilterResult<RasterImage> {
        let next = match filter.apply_with(&self.current, &self.config) {
            Ok(next) => next,
            Err(e) => {
                warn!(filter = %filter, error = %e, "filter failed, keeping current image");
                return Err(e);
            }
        };
        debug_assert_eq!(next.dimensions(), self.original.dimensions());

        info!(
            filter = %filter,
            width = next.width(),
            height = next.height(),
            chain = self.applied.len() + 1,
            "applied filter"
        );
        self.current = next;
        self.applied.push(filter);
        self.notify();
        Ok(self.current.clone())
    }

    /// Parse `spec` (e.g. `"blur:10"`) with this session's defaults and apply it.
    pub fn apply_named(&mut self, spec: &str) -> FilterResult<RasterImage> {
        let filter = Filter::parse_with(spec, &self.config)?;
        self.apply_filter(filter)
    }

    /// Drop every applied filter and show the original again.
    pub fn clear_filters(&mut self) -> RasterImage {
        info!(discarded = self.applied.len(), "clearing all filters");
        self.current = self.original.clone();
        self.applied.clear();
        self.notify();
        self.current.clone()
    }

    /// Replace the source image, discarding all filter state.
    pub fn load_source(&mut self, original: RasterImage) {
        info!(
            width = original.width(),
            height = original.height(),
            "loading new source image"
        );
        self.current = original.clone();
        self.original = original;
        self.applied.clear();
        self.notify();
    }

    /// Hand the current image to a persistence sink.
    pub fn save<S: PersistenceSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        info!(
            width = self.current.width(),
            height = self.current.height(),
            "saving filtered image"
        );
        sink.persist(&self.current)
    }

    fn notify(&mut self) {
        if let Some(sink) = self.display.as_mut() {
            sink.show(&self.current);
        }
    }
}

impl fmt::Debug for FilterSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSession")
            .field("dimensions", &self.original.dimensions())
            .field("state", &self.state())
            .field("applied", &self.applied)
            .field("config", &self.config)
            .field("display", &self.display.is_some())
            .finish()
    }
}
