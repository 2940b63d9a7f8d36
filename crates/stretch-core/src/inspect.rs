//! Before/after inspection of a small pixel window.
//!
//! Only the top-left `size x size` window of an image is inspectable
//! (clipped when the image is smaller). Coordinates follow matrix
//! convention: `x` is the row (top to bottom), `y` the column (left to right).

use crate::image::check_shape;
use crate::{IntensityImage, StretchError, StretchResult, StretchedImage};

/// Default side length of the inspection window.
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Input and output value of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPair {
    /// Row.
    pub x: usize,
    /// Column.
    pub y: usize,
    /// Input sample truncated toward zero.
    pub input: i32,
    /// Stretched output level.
    pub output: i32,
}

/// Read row `x`, column `y` from both images.
///
/// # Errors
///
/// - [`StretchError::InvalidDimensions`] if the two images differ in shape
///   or either buffer does not fill its declared shape.
/// - [`StretchError::OutOfBounds`] if `(x, y)` is outside the inspectable window.
pub fn lookup(
    input: &IntensityImage,
    output: &StretchedImage,
    x: usize,
    y: usize,
    grid_size: usize,
) -> StretchResult<PixelPair> {
    check_same_shape(input, output)?;
    let (rows, cols) = window(input, grid_size);
    if x >= rows || y >= cols {
        return Err(StretchError::out_of_bounds(x, y, rows, cols));
    }
    let idx = x * input.width + y;
    Ok(PixelPair {
        x,
        y,
        input: input.data[idx] as i32,
        output: i32::from(output.data[idx]),
    })
}

/// Copy of the inspectable window of an input/output pair.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionGrid {
    rows: usize,
    cols: usize,
    input: Vec<f32>,
    output: Vec<u8>,
}

impl InspectionGrid {
    /// Capture the top-left `size x size` window.
    pub fn new(input: &IntensityImage, output: &StretchedImage, size: usize) -> StretchResult<Self> {
        check_same_shape(input, output)?;
        let (rows, cols) = window(input, size);
        let mut grid_in = Vec::with_capacity(rows * cols);
        let mut grid_out = Vec::with_capacity(rows * cols);
        for x in 0..rows {
            let start = x * input.width;
            grid_in.extend_from_slice(&input.data[start..start + cols]);
            grid_out.extend_from_slice(&output.data[start..start + cols]);
        }
        Ok(Self {
            rows,
            cols,
            input: grid_in,
            output: grid_out,
        })
    }

    /// `(rows, cols)` of the window.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Before/after values at row `x`, column `y`.
    pub fn lookup(&self, x: usize, y: usize) -> StretchResult<PixelPair> {
        if x >= self.rows || y >= self.cols {
            return Err(StretchError::out_of_bounds(x, y, self.rows, self.cols));
        }
        Ok(self.pair(x, y))
    }

    /// Every pixel of the window, row by row.
    pub fn rows(&self) -> Vec<Vec<PixelPair>> {
        (0..self.rows)
            .map(|x| (0..self.cols).map(|y| self.pair(x, y)).collect())
            .collect()
    }

    fn pair(&self, x: usize, y: usize) -> PixelPair {
        let idx = x * self.cols + y;
        PixelPair {
            x,
            y,
            input: self.input[idx] as i32,
            output: i32::from(self.output[idx]),
        }
    }
}

fn window(input: &IntensityImage, size: usize) -> (usize, usize) {
    (size.min(input.height), size.min(input.width))
}

fn check_same_shape(input: &IntensityImage, output: &StretchedImage) -> StretchResult<()> {
    check_shape(input.width, input.height, input.data.len())?;
    check_shape(output.width, output.height, output.data.len())?;
    if input.shape() != output.shape() {
        return Err(StretchError::InvalidDimensions(format!(
            "input is {}x{}, output is {}x{}",
            input.width, input.height, output.width, output.height
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Breakpoints, StretchCurve};

    fn fixture(width: usize, height: usize) -> (IntensityImage, StretchedImage) {
        let data: Vec<f32> = (0..width * height).map(|i| (i % 256) as f32 + 0.7).collect();
        let input = IntensityImage::new(width, height, data).unwrap();
        let curve = StretchCurve::new(Breakpoints::default()).unwrap();
        let output = curve.apply(&input).unwrap();
        (input, output)
    }

    #[test]
    fn test_lookup_matches_curve() {
        let (input, output) = fixture(20, 20);
        let curve = StretchCurve::new(Breakpoints::default()).unwrap();
        let pair = lookup(&input, &output, 5, 5, DEFAULT_GRID_SIZE).unwrap();
        let raw = input.get(5, 5).unwrap();
        assert_eq!(pair.input, raw as i32);
        assert_eq!(pair.output, i32::from(curve.map(f64::from(raw))));
    }

    #[test]
    fn test_input_truncated() {
        let (input, output) = fixture(12, 12);
        // Sample at (0, 3) is 3.7.
        assert_eq!(lookup(&input, &output, 0, 3, 10).unwrap().input, 3);
    }

    #[test]
    fn test_window_bounds() {
        let (input, output) = fixture(20, 20);
        assert!(lookup(&input, &output, 9, 9, 10).is_ok());
        let err = lookup(&input, &output, 10, 0, 10).unwrap_err();
        assert!(matches!(
            err,
            StretchError::OutOfBounds { x: 10, y: 0, rows: 10, cols: 10 }
        ));
        assert!(lookup(&input, &output, 0, 10, 10).is_err());
    }

    #[test]
    fn test_window_clipped_to_small_image() {
        let (input, output) = fixture(4, 3);
        let grid = InspectionGrid::new(&input, &output, 10).unwrap();
        assert_eq!(grid.shape(), (3, 4));
        assert!(grid.lookup(2, 3).is_ok());
        assert!(grid.lookup(3, 0).is_err());
    }

    #[test]
    fn test_grid_agrees_with_lookup() {
        let (input, output) = fixture(15, 11);
        let grid = InspectionGrid::new(&input, &output, DEFAULT_GRID_SIZE).unwrap();
        let rows = grid.rows();
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.len() == 10));
        for row in rows {
            for pair in row {
                assert_eq!(pair, lookup(&input, &output, pair.x, pair.y, 10).unwrap());
            }
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let (input, _) = fixture(4, 4);
        let (_, other) = fixture(5, 4);
        assert!(matches!(
            lookup(&input, &other, 0, 0, 10),
            Err(StretchError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let input = IntensityImage { width: 4, height: 4, data: vec![1.0; 3] };
        let output = StretchedImage { width: 4, height: 4, data: vec![0; 3] };
        assert!(matches!(
            lookup(&input, &output, 2, 2, 10),
            Err(StretchError::InvalidDimensions(_))
        ));
        assert!(matches!(
            InspectionGrid::new(&input, &output, 10),
            Err(StretchError::InvalidDimensions(_))
        ));

        let (input, _) = fixture(4, 4);
        let output = StretchedImage { width: 4, height: 4, data: vec![0; 15] };
        assert!(InspectionGrid::new(&input, &output, 10).is_err());
    }
}
