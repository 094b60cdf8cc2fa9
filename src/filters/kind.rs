//! Filter selection: a transform plus its parameter.
//!
//! [`Filter`] is what callers hand to [`crate::FilterSession::apply_filter`].
//! It can also be parsed from short names such as `"gray"` or `"blur:4.5"`.

use std::fmt;
use std::str::FromStr;

use super::{blur, color_adjust, grayscale, sharpen};
use crate::config::{FilterConfig, DEFAULT_SHARPEN_STRENGTH, MAX_BLUR_RADIUS};
use crate::error::{FilterError, FilterResult};
use crate::raster::RasterImage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    Invert,
    Grayscale,
    Blur { radius: f32 },
    Sharpen { strength: f32 },
    Gbr,
    Brg,
}

impl Filter {
    /// Every filter kind with its default parameter.
    pub const ALL_DEFAULT: [Filter; 6] = [
        Filter::Invert,
        Filter::Grayscale,
        Filter::Blur {
            radius: MAX_BLUR_RADIUS,
        },
        Filter::Sharpen {
            strength: DEFAULT_SHARPEN_STRENGTH,
        },
        Filter::Gbr,
        Filter::Brg,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Filter::Invert => "invert",
            Filter::Grayscale => "grayscale",
            Filter::Blur { .. } => "blur",
            Filter::Sharpen { .. } => "sharpen",
            Filter::Gbr => "gbr",
            Filter::Brg => "brg",
        }
    }

    /// Apply with the default configuration.
    pub fn apply(&self, image: &RasterImage) -> FilterResult<RasterImage> {
        self.apply_with(image, &FilterConfig::default())
    }

    /// Apply honoring `config.radius_policy`.
    pub fn apply_with(
        &self,
        image: &RasterImage,
        config: &FilterConfig,
    ) -> FilterResult<RasterImage> {
        let input = image.view();
        let output = match *self {
            Filter::Invert => color_adjust::invert_u8(input)?,
            Filter::Grayscale => grayscale::grayscale_rgba_u8(input)?,
            Filter::Blur { radius } => {
                blur::gaussian_blur_with_policy(input, radius, config.radius_policy)?
            }
            Filter::Sharpen { strength } => sharpen::sharpen_u8(input, strength)?,
            Filter::Gbr => color_adjust::gbr_u8(input)?,
            Filter::Brg => color_adjust::brg_u8(input)?,
        };
        debug_assert_eq!(output.dim(), input.dim());
        Ok(RasterImage::from_validated(output))
    }

    /// Parse `name` or `name:param`, filling missing parameters from `config`.
    pub fn parse_with(spec: &str, config: &FilterConfig) -> FilterResult<Filter> {
        let spec = spec.trim();
        let (name, param) = match spec.split_once(':') {
            Some((name, param)) => (name.trim(), Some(param.trim())),
            None => (spec, None),
        };

        let parse_param = |key: &'static str, default: f32| -> FilterResult<f32> {
            match param {
                None => Ok(default),
                Some(raw) => raw
                    .parse::<f32>()
                    .map_err(|e| FilterError::parameter(key, raw, e.to_string())),
            }
        };
        let no_param = |filter: Filter| -> FilterResult<Filter> {
            match param {
                None => Ok(filter),
                Some(raw) => Err(FilterError::parameter(
                    "filter",
                    spec,
                    format!("`{}` takes no parameter, got `{}`", filter.name(), raw),
                )),
            }
        };

        match name.to_ascii_lowercase().as_str() {
            "invert" => no_param(Filter::Invert),
            "grayscale" | "gray" | "grey" => no_param(Filter::Grayscale),
            "gbr" => no_param(Filter::Gbr),
            "brg" => no_param(Filter::Brg),
            "blur" => Ok(Filter::Blur {
                radius: parse_param("radius", config.default_blur_radius)?,
            }),
            "sharpen" | "sharp" => Ok(Filter::Sharpen {
                strength: parse_param("strength", config.default_sharpen_strength)?,
            }),
            _ => Err(FilterError::parameter("filter", spec, "unknown filter")),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Blur { radius } => write!(f, "blur:{}", radius),
            Filter::Sharpen { strength } => write!(f, "sharpen:{}", strength),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::parse_with(s, &FilterConfig::default())
    }
}
