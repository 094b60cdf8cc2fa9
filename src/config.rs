//! Engine configuration.
//!
//! Holds the parameter policy and the default parameters used when a filter
//! is selected without an explicit value (e.g. `"blur"` parsed by name).

/// Largest blur radius accepted by [`crate::filters::blur::gaussian_blur_u8`].
pub const MAX_BLUR_RADIUS: f32 = 25.0;

/// Sharpen strength used when none is given.
pub const DEFAULT_SHARPEN_STRENGTH: f32 = 1.0;

/// How an out-of-range blur radius is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadiusPolicy {
    /// Fail with [`crate::FilterError::InvalidParameter`].
    #[default]
    Reject,
    /// Clamp into `[0, MAX_BLUR_RADIUS]`. NaN becomes 0.
    Clamp,
}

impl RadiusPolicy {
    /// Clamp `radius` if the policy allows it, otherwise return it untouched.
    pub fn resolve(self, radius: f32) -> f32 {
        match self {
            RadiusPolicy::Reject => radius,
            RadiusPolicy::Clamp => {
                if radius.is_nan() {
                    0.0
                } else {
                    radius.clamp(0.0, MAX_BLUR_RADIUS)
                }
            }
        }
    }
}

/// Tunables shared by [`crate::FilterSession`] and [`crate::Filter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    pub radius_policy: RadiusPolicy,
    pub default_blur_radius: f32,
    pub default_sharpen_strength: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            radius_policy: RadiusPolicy::Reject,
            default_blur_radius: MAX_BLUR_RADIUS,
            default_sharpen_strength: DEFAULT_SHARPEN_STRENGTH,
        }
    }
}

impl FilterConfig {
    pub fn with_radius_policy(mut self, policy: RadiusPolicy) -> Self {
        self.radius_policy = policy;
        self
    }

    pub fn with_default_blur_radius(mut self, radius: f32) -> Self {
        self.default_blur_radius = radius;
        self
    }

    pub fn with_default_sharpen_strength(mut self, strength: f32) -> Self {
        self.default_sharpen_strength = strength;
        self
    }
}
