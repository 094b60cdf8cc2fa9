//! Error types for the filter engine.
//!
//! Every failure is local to one call: a transform either produces a
//! complete new raster or returns one of these without touching anything.

use thiserror::Error;

/// Errors raised by transforms, raster construction and sessions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// Pixel buffer does not describe a valid RGBA raster.
    #[error("invalid image data: {reason}")]
    InvalidImageData { reason: String },

    /// A filter parameter is out of range or could not be parsed.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl FilterError {
    pub(crate) fn image_data(reason: impl Into<String>) -> Self {
        Self::InvalidImageData {
            reason: reason.into(),
        }
    }

    pub(crate) fn parameter(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = FilterError::image_data("expected 16 bytes, got 12");
        assert_eq!(err.to_string(), "invalid image data: expected 16 bytes, got 12");

        let err = FilterError::parameter("radius", 30.0, "must be within [0, 25]");
        assert_eq!(
            err.to_string(),
            "invalid parameter `radius` = 30: must be within [0, 25]"
        );
    }
}
