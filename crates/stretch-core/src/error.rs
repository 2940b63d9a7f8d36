//! Error types for contrast stretching.
//!
//! All variants are recoverable and describe which bound the caller
//! violated, so an interactive front end can point at the offending control.
//!
//! # Categories
//!
//! - **Parameter errors**: [`InvalidRange`](StretchError::InvalidRange),
//!   [`DegenerateParameters`](StretchError::DegenerateParameters)
//! - **Grid errors**: [`OutOfBounds`](StretchError::OutOfBounds),
//!   [`InvalidDimensions`](StretchError::InvalidDimensions)
//! - **Preset errors**: [`Preset`](StretchError::Preset), [`Io`](StretchError::Io)

use thiserror::Error;

/// Result type alias using [`StretchError`].
pub type StretchResult<T> = std::result::Result<T, StretchError>;

/// Errors raised by the parameter model and the transform engine.
#[derive(Debug, Error)]
pub enum StretchError {
    /// A breakpoint or target value is outside its legal domain.
    ///
    /// `min` and `max` are the inclusive bounds that applied to `param`
    /// at the time of validation (for `r2` the lower bound is `r1 + 1`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use stretch_core::StretchError;
    ///
    /// let err = StretchError::invalid_range("r1", 0, 1, 254);
    /// assert!(err.to_string().contains("r1"));
    /// ```
    #[error("{param} = {value} is outside the legal range [{min}, {max}]")]
    InvalidRange {
        /// Name of the parameter (`r1`, `r2`, `s1` or `s2`).
        param: &'static str,
        /// Value that was supplied.
        value: i32,
        /// Inclusive lower bound.
        min: i32,
        /// Inclusive upper bound.
        max: i32,
    },

    /// Parameters reached the engine without validation and would divide
    /// by zero or produce non-finite slopes.
    #[error("degenerate parameters: {0}")]
    DegenerateParameters(String),

    /// Inspection coordinate outside the inspectable window.
    #[error("pixel (x={x}, y={y}) out of bounds for {rows}x{cols} inspection grid")]
    OutOfBounds {
        /// Row that was requested.
        x: usize,
        /// Column that was requested.
        y: usize,
        /// Rows in the inspectable window.
        rows: usize,
        /// Columns in the inspectable window.
        cols: usize,
    },

    /// Sample buffer does not match the declared shape.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Preset file could not be parsed.
    #[error("preset error: {0}")]
    Preset(String),

    /// I/O error while reading a preset.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StretchError {
    /// Creates a [`StretchError::InvalidRange`] error.
    #[inline]
    pub fn invalid_range(param: &'static str, value: i32, min: i32, max: i32) -> Self {
        Self::InvalidRange {
            param,
            value,
            min,
            max,
        }
    }

    /// Creates a [`StretchError::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: usize, y: usize, rows: usize, cols: usize) -> Self {
        Self::OutOfBounds { x, y, rows, cols }
    }

    /// Returns `true` if this error came from parameter checks.
    #[inline]
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange { .. } | Self::DegenerateParameters(_)
        )
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
