//! Three-segment piecewise-linear transform.
//!
//! The mapping for an input sample `u`:
//!
//! ```text
//! f(u) = alpha * u               u <  r1
//! f(u) = beta * (u - r1) + s1    r1 <= u < r2
//! f(u) = gamma * (u - r2) + s2   u >= r2
//! ```
//!
//! All arithmetic is `f64`. Each result is clamped to `[0, 255]` and rounded
//! to the nearest integer exactly once, when it is written to the output.
//!
//! # Example
//!
//! ```rust
//! use stretch_core::{Breakpoints, IntensityImage, transform};
//!
//! let bp = Breakpoints::new(70, 140, 30, 200).unwrap();
//! let input = IntensityImage::from_u8(4, 1, &[0, 70, 140, 255]).unwrap();
//! let out = transform(&input, &bp.slopes(), &bp).unwrap();
//! assert_eq!(out.data, vec![0, 30, 200, 255]);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::image::check_shape;
use crate::params::MAX_INTENSITY;
use crate::{Breakpoints, IntensityImage, Slopes, StretchError, StretchResult, StretchedImage};

/// Evaluate `f(u)` without clamping.
///
/// `u == r1` falls in the middle segment and `u == r2` in the upper one.
#[inline]
pub fn evaluate(u: f64, slopes: &Slopes, bp: &Breakpoints) -> f64 {
    let r1 = f64::from(bp.r1);
    let r2 = f64::from(bp.r2);
    if u < r1 {
        slopes.alpha * u
    } else if u < r2 {
        slopes.beta * (u - r1) + f64::from(bp.s1)
    } else {
        slopes.gamma * (u - r2) + f64::from(bp.s2)
    }
}

/// Clamp to `[0, 255]` and round to the nearest 8-bit level.
///
/// NaN maps to 0.
#[inline]
pub fn clamp_to_u8(v: f64) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.clamp(0.0, f64::from(MAX_INTENSITY)).round() as u8
    }
}

/// Reject parameters that would divide by zero or leak non-finite values.
///
/// Runs on every [`transform`] call regardless of earlier validation.
pub fn check_preconditions(slopes: &Slopes, bp: &Breakpoints) -> StretchResult<()> {
    if bp.r1 <= 0 {
        return Err(StretchError::DegenerateParameters(format!(
            "r1 = {} leaves the lower segment without width",
            bp.r1
        )));
    }
    if bp.r1 >= bp.r2 {
        return Err(StretchError::DegenerateParameters(format!(
            "r1 = {} must be below r2 = {}",
            bp.r1, bp.r2
        )));
    }
    if !slopes.is_finite() {
        return Err(StretchError::DegenerateParameters(format!(
            "non-finite slopes ({}, {}, {})",
            slopes.alpha, slopes.beta, slopes.gamma
        )));
    }
    Ok(())
}

/// Apply the stretch to every sample of `input`.
///
/// Rows are processed in parallel when the `parallel` feature is enabled.
/// The output always has the input's shape and every value is a valid
/// 8-bit level, however steep the slopes are.
///
/// # Errors
///
/// - [`StretchError::DegenerateParameters`] if `r1 >= r2`, `r1 <= 0`, or any
///   slope is not finite.
/// - [`StretchError::InvalidDimensions`] if `input.data` does not fill
///   `input.width x input.height`.
pub fn transform(
    input: &IntensityImage,
    slopes: &Slopes,
    bp: &Breakpoints,
) -> StretchResult<StretchedImage> {
    check_preconditions(slopes, bp)?;
    check_shape(input.width, input.height, input.len())?;
    debug!(
        width = input.width,
        height = input.height,
        r1 = bp.r1,
        r2 = bp.r2,
        s1 = bp.s1,
        s2 = bp.s2,
        "stretch transform"
    );

    let mut out = vec![0u8; input.len()];
    if !out.is_empty() {
        let map_row = |(dst, src): (&mut [u8], &[f32])| {
            for (d, &u) in dst.iter_mut().zip(src) {
                *d = clamp_to_u8(evaluate(f64::from(u), slopes, bp));
            }
        };

        #[cfg(feature = "parallel")]
        out.par_chunks_mut(input.width)
            .zip(input.data.par_chunks(input.width))
            .for_each(map_row);

        #[cfg(not(feature = "parallel"))]
        out.chunks_mut(input.width)
            .zip(input.data.chunks(input.width))
            .for_each(map_row);
    }

    StretchedImage::new(input.width, input.height, out)
}

/// One straight piece of the transformation graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Input/output at the start of the piece.
    pub start: (f64, f64),
    /// Input/output at the end of the piece.
    pub end: (f64, f64),
    /// Slope of the piece.
    pub slope: f64,
}

/// Validated breakpoints together with their slopes.
///
/// Convenience wrapper for callers that apply the same curve repeatedly;
/// it holds no state beyond the parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchCurve {
    breakpoints: Breakpoints,
    slopes: Slopes,
}

impl StretchCurve {
    /// Validate `bp` and derive its slopes.
    pub fn new(bp: Breakpoints) -> StretchResult<Self> {
        bp.validate()?;
        Ok(Self {
            breakpoints: bp,
            slopes: bp.slopes(),
        })
    }

    /// The breakpoints.
    #[inline]
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// The unrounded slopes.
    #[inline]
    pub fn slopes(&self) -> &Slopes {
        &self.slopes
    }

    /// `f(u)` before clamping.
    #[inline]
    pub fn evaluate(&self, u: f64) -> f64 {
        evaluate(u, &self.slopes, &self.breakpoints)
    }

    /// `f(u)` clamped and rounded to 8 bits.
    #[inline]
    pub fn map(&self, u: f64) -> u8 {
        clamp_to_u8(self.evaluate(u))
    }

    /// Apply to a float image. See [`transform`].
    pub fn apply(&self, input: &IntensityImage) -> StretchResult<StretchedImage> {
        transform(input, &self.slopes, &self.breakpoints)
    }

    /// Output level for every 8-bit input level.
    pub fn lut(&self) -> [u8; 256] {
        let mut lut = [0u8; 256];
        for (u, v) in lut.iter_mut().enumerate() {
            *v = self.map(u as f64);
        }
        lut
    }

    /// Apply to 8-bit samples through a 256-entry table.
    ///
    /// Identical to [`StretchCurve::apply`] on the same samples widened to `f32`.
    pub fn apply_u8(&self, width: usize, height: usize, data: &[u8]) -> StretchResult<StretchedImage> {
        check_preconditions(&self.slopes, &self.breakpoints)?;
        check_shape(width, height, data.len())?;
        let lut = self.lut();
        trace!(width, height, "stretch via lookup table");

        #[cfg(feature = "parallel")]
        let out: Vec<u8> = data.par_iter().map(|&u| lut[u as usize]).collect();
        #[cfg(not(feature = "parallel"))]
        let out: Vec<u8> = data.iter().map(|&u| lut[u as usize]).collect();

        StretchedImage::new(width, height, out)
    }

    /// The three pieces of the graph, `(0,0)` to `(255,255)`.
    pub fn segments(&self) -> [Segment; 3] {
        let bp = &self.breakpoints;
        let (r1, r2) = (f64::from(bp.r1), f64::from(bp.r2));
        let (s1, s2) = (f64::from(bp.s1), f64::from(bp.s2));
        let max = f64::from(MAX_INTENSITY);
        [
            Segment { start: (0.0, 0.0), end: (r1, s1), slope: self.slopes.alpha },
            Segment { start: (r1, s1), end: (r2, s2), slope: self.slopes.beta },
            Segment { start: (r2, s2), end: (max, max), slope: self.slopes.gamma },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn reference() -> StretchCurve {
        StretchCurve::new(Breakpoints::new(70, 140, 30, 200).unwrap()).unwrap()
    }

    fn ramp() -> IntensityImage {
        let data: Vec<u8> = (0..=255).collect();
        IntensityImage::from_u8(16, 16, &data).unwrap()
    }

    #[test]
    fn test_reference_points() {
        let curve = reference();
        assert_eq!(curve.map(0.0), 0);
        assert_eq!(curve.map(70.0), 30);
        assert_eq!(curve.map(140.0), 200);
        assert_eq!(curve.map(255.0), 255);
    }

    #[test]
    fn test_breakpoints_hit_targets_exactly() {
        for (r1, r2, s1, s2) in [(70, 140, 30, 200), (1, 255, 0, 255), (100, 101, 250, 3), (13, 77, 91, 91)] {
            let bp = Breakpoints::new(r1, r2, s1, s2).unwrap();
            let slopes = bp.slopes();
            assert_eq!(evaluate(f64::from(r1), &slopes, &bp), f64::from(s1));
            assert_eq!(evaluate(f64::from(r2), &slopes, &bp), f64::from(s2));
        }
    }

    #[test]
    fn test_segment_assignment_at_breakpoints() {
        // Slopes unrelated to the targets make each segment distinguishable.
        let bp = Breakpoints { r1: 70, r2: 140, s1: 30, s2: 200 };
        let slopes = Slopes { alpha: 1.0, beta: 0.5, gamma: 2.0 };
        assert_eq!(evaluate(69.0, &slopes, &bp), 69.0);
        assert_eq!(evaluate(70.0, &slopes, &bp), 30.0);
        assert_eq!(evaluate(139.0, &slopes, &bp), 30.0 + 0.5 * 69.0);
        assert_eq!(evaluate(140.0, &slopes, &bp), 200.0);
        assert_eq!(evaluate(141.0, &slopes, &bp), 202.0);
    }

    #[test]
    fn test_continuity_from_below() {
        let curve = reference();
        assert_abs_diff_eq!(curve.evaluate(70.0 - 1e-9), 30.0, epsilon = 1e-6);
        assert_abs_diff_eq!(curve.evaluate(140.0 - 1e-9), 200.0, epsilon = 1e-6);
    }

    #[test]
    fn test_output_is_clamped() {
        let bp = Breakpoints { r1: 10, r2: 20, s1: 30, s2: 200 };
        let slopes = Slopes { alpha: 40.0, beta: -50.0, gamma: 3.0 };
        let input = IntensityImage::new(4, 1, vec![9.0, 15.0, 250.0, -20.0]).unwrap();
        let out = transform(&input, &slopes, &bp).unwrap();
        assert_eq!(out.data, vec![255, 0, 255, 0]);
    }

    #[test]
    fn test_rounding_happens_once() {
        let bp = Breakpoints::new(2, 200, 1, 100).unwrap();
        let input = IntensityImage::new(2, 1, vec![1.0, 0.8]).unwrap();
        let out = transform(&input, &bp.slopes(), &bp).unwrap();
        // alpha = 0.5: 1.0 -> 0.5 -> 1, 0.8 -> 0.4 -> 0
        assert_eq!(out.data, vec![1, 0]);
    }

    #[test]
    fn test_nan_input_maps_to_zero() {
        let curve = reference();
        let input = IntensityImage::new(1, 1, vec![f32::NAN]).unwrap();
        assert_eq!(curve.apply(&input).unwrap().data, vec![0]);
    }

    #[test]
    fn test_shape_preserved() {
        let curve = reference();
        let input = IntensityImage::new(7, 3, vec![128.0; 21]).unwrap();
        let out = curve.apply(&input).unwrap();
        assert_eq!(out.shape(), input.shape());
        assert_eq!(out.data.len(), 21);
    }

    #[test]
    fn test_deterministic() {
        let curve = reference();
        let input = ramp();
        let a = curve.apply(&input).unwrap();
        let b = curve.apply(&input).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_image() {
        let curve = reference();
        let input = IntensityImage::new(0, 0, vec![]).unwrap();
        let out = curve.apply(&input).unwrap();
        assert!(out.data.is_empty());
    }

    #[test]
    fn test_buffer_not_matching_shape() {
        let bp = Breakpoints::default();
        let zero_width = IntensityImage { width: 0, height: 1, data: vec![10.0] };
        assert!(matches!(
            transform(&zero_width, &bp.slopes(), &bp),
            Err(StretchError::InvalidDimensions(_))
        ));

        let short = IntensityImage { width: 4, height: 4, data: vec![10.0; 15] };
        assert!(matches!(
            transform(&short, &bp.slopes(), &bp),
            Err(StretchError::InvalidDimensions(_))
        ));

        let curve = reference();
        assert!(matches!(
            curve.apply_u8(0, 1, &[10]),
            Err(StretchError::InvalidDimensions(_))
        ));
        assert!(matches!(
            curve.apply_u8(4, 4, &[10; 17]),
            Err(StretchError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_reversed_breakpoints_degenerate() {
        let bp = Breakpoints { r1: 140, r2: 70, s1: 30, s2: 200 };
        let err = transform(&ramp(), &bp.slopes(), &bp).unwrap_err();
        assert!(matches!(err, StretchError::DegenerateParameters(_)));
    }

    #[test]
    fn test_equal_breakpoints_degenerate() {
        let bp = Breakpoints { r1: 90, r2: 90, s1: 30, s2: 200 };
        let slopes = Slopes { alpha: 1.0, beta: 1.0, gamma: 1.0 };
        assert!(matches!(
            transform(&ramp(), &slopes, &bp),
            Err(StretchError::DegenerateParameters(_))
        ));
    }

    #[test]
    fn test_non_finite_slopes_degenerate() {
        let bp = Breakpoints::default();
        let slopes = Slopes { alpha: f64::INFINITY, beta: 1.0, gamma: 1.0 };
        assert!(matches!(
            transform(&ramp(), &slopes, &bp),
            Err(StretchError::DegenerateParameters(_))
        ));
    }

    #[test]
    fn test_zero_r1_degenerate() {
        let bp = Breakpoints { r1: 0, r2: 70, s1: 30, s2: 200 };
        let slopes = Slopes { alpha: 0.0, beta: 1.0, gamma: 1.0 };
        assert!(check_preconditions(&slopes, &bp).is_err());
    }

    #[test]
    fn test_upper_breakpoint_at_max() {
        let curve = StretchCurve::new(Breakpoints::new(50, 255, 20, 180).unwrap()).unwrap();
        assert_eq!(curve.map(255.0), 180);
        // beta = 160 / 205: 20 + 204 * beta = 179.2
        assert_eq!(curve.map(254.0), 179);
        assert!(curve.slopes().is_finite());
    }

    #[test]
    fn test_lut_matches_float_path() {
        for bp in [Breakpoints::default(), Breakpoints::new(3, 250, 255, 0).unwrap()] {
            let curve = StretchCurve::new(bp).unwrap();
            let data: Vec<u8> = (0..=255).collect();
            let via_lut = curve.apply_u8(16, 16, &data).unwrap();
            let via_float = curve.apply(&IntensityImage::from_u8(16, 16, &data).unwrap()).unwrap();
            assert_eq!(via_lut, via_float);
        }
    }

    #[test]
    fn test_segments() {
        let segs = reference().segments();
        assert_eq!(segs[0].start, (0.0, 0.0));
        assert_eq!(segs[0].end, (70.0, 30.0));
        assert_eq!(segs[1].end, (140.0, 200.0));
        assert_eq!(segs[2].end, (255.0, 255.0));
        assert_abs_diff_eq!(segs[2].slope, 55.0 / 115.0);
    }
}
