//! Field generation errors
//!
//! Invalid generator input is a programming error: it is rejected before any
//! sampling happens so no NaN or infinite value ever reaches a descriptor.

use thiserror::Error;

/// Result type for field generation.
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors raised while validating a field configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// A field was asked to hold no particles.
    #[error("{field} count must be greater than zero")]
    EmptyCount { field: &'static str },

    /// A radius was zero, negative or not finite.
    #[error("{field} must be positive and finite, got {value}")]
    InvalidRadius { field: &'static str, value: f32 },

    /// The outer radius lies inside the inner radius.
    #[error("outer radius {outer} is smaller than inner radius {inner}")]
    InvertedRadii { inner: f32, outer: f32 },

    /// A tuning parameter was negative or not finite.
    #[error("{field} must be non-negative and finite, got {value}")]
    InvalidParameter { field: &'static str, value: f32 },

    /// A scale range with min above max.
    #[error("scale range {min}..{max} is empty")]
    InvalidScaleRange { min: f32, max: f32 },

    /// The palette has no colors to pick from.
    #[error("palette has no colors")]
    EmptyPalette,
}

/// Reject zero, negative and non-finite radii.
pub(crate) fn check_radius(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidRadius { field, value })
    }
}

/// Reject negative and non-finite parameters.
pub(crate) fn check_non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidParameter { field, value })
    }
}

/// Reject a derived value that overflowed.
pub(crate) fn check_finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FieldError::InvalidParameter { field, value })
    }
}

/// Scale ranges must be finite, non-negative and ordered.
pub(crate) fn check_scale_range(min: f32, max: f32) -> Result<()> {
    check_non_negative("min scale", min)?;
    check_non_negative("max scale", max)?;
    if min > max {
        return Err(FieldError::InvalidScaleRange { min, max });
    }
    Ok(())
}
