//! Single-channel sample grids.
//!
//! [`IntensityImage`] holds input samples as `f32` so no rounding happens
//! before the stretch. [`StretchedImage`] holds the 8-bit result. Both are
//! row-major: the sample at row `x`, column `y` lives at `x * width + y`.

use crate::{StretchError, StretchResult};

/// Grayscale input samples, nominally in `[0, 255]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityImage {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Row-major samples, `width * height` long.
    pub data: Vec<f32>,
}

impl IntensityImage {
    /// Wrap a sample buffer, checking it matches the shape.
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> StretchResult<Self> {
        check_shape(width, height, data.len())?;
        Ok(Self { width, height, data })
    }

    /// Build from 8-bit samples.
    pub fn from_u8(width: usize, height: usize, data: &[u8]) -> StretchResult<Self> {
        check_shape(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data: data.iter().map(|&v| f32::from(v)).collect(),
        })
    }

    /// Sample at row `x`, column `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        (x < self.height && y < self.width).then(|| self.data[x * self.width + y])
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` for a zero-area image.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 8-bit output of a stretch, same shape as its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StretchedImage {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Row-major samples, `width * height` long.
    pub data: Vec<u8>,
}

impl StretchedImage {
    /// Wrap an 8-bit buffer, checking it matches the shape.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> StretchResult<Self> {
        check_shape(width, height, data.len())?;
        Ok(Self { width, height, data })
    }

    /// Sample at row `x`, column `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        (x < self.height && y < self.width).then(|| self.data[x * self.width + y])
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }
}

/// Fail unless `len` samples exactly fill a `width x height` grid.
pub(crate) fn check_shape(width: usize, height: usize, len: usize) -> StretchResult<()> {
    let expected = width.checked_mul(height).ok_or_else(|| {
        StretchError::InvalidDimensions(format!("{width}x{height} overflows"))
    })?;
    if len != expected {
        return Err(StretchError::InvalidDimensions(format!(
            "expected {expected} samples for {width}x{height}, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_access() {
        let img = IntensityImage::new(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(img.shape(), (2, 3));
        assert_eq!(img.get(0, 2), Some(2.0));
        assert_eq!(img.get(1, 0), Some(3.0));
        assert_eq!(img.get(2, 0), None);
        assert_eq!(img.get(0, 3), None);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = IntensityImage::new(4, 4, vec![0.0; 15]).unwrap_err();
        assert!(matches!(err, StretchError::InvalidDimensions(_)));
        assert!(StretchedImage::new(2, 2, vec![0; 5]).is_err());
    }

    #[test]
    fn test_from_u8() {
        let img = IntensityImage::from_u8(2, 1, &[0, 255]).unwrap();
        assert_eq!(img.data, vec![0.0, 255.0]);
    }
}
