//! Breakpoint parameters and slope derivation.
//!
//! A three-segment stretch is fully described by two input breakpoints
//! (`r1`, `r2`) and the output levels they map to (`s1`, `s2`). The segment
//! endpoints `(0, 0)` and `(255, 255)` are fixed.
//!
//! ```text
//!  255 |                 ____/
//!   s2 |            ____/
//!      |           /
//!      |          /
//!   s1 |     ____/
//!    0 |____/____________________
//!      0    r1   r2           255
//! ```
//!
//! # Example
//!
//! ```rust
//! use stretch_core::{Breakpoints, derive_slopes};
//!
//! let bp = Breakpoints::new(70, 140, 30, 200).unwrap();
//! let slopes = derive_slopes(&bp);
//! assert!((slopes.alpha - 30.0 / 70.0).abs() < 1e-12);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{StretchError, StretchResult};

/// Largest 8-bit intensity.
pub const MAX_INTENSITY: i32 = 255;

/// Smallest legal lower breakpoint.
pub const R1_MIN: i32 = 1;

/// Largest legal lower breakpoint.
pub const R1_MAX: i32 = 254;

/// Decimal places used when slopes are shown to a user.
pub const DISPLAY_PRECISION: u32 = 3;

/// The four user-chosen values of a three-segment stretch.
///
/// Fields are public so callers can build a value directly; [`Breakpoints::new`]
/// is the checked constructor. The transform engine re-checks ordering on
/// entry, so an unchecked value can never reach the per-pixel loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Lower input breakpoint, `1..=254`.
    pub r1: i32,
    /// Upper input breakpoint, `r1+1..=255`.
    pub r2: i32,
    /// Output level at `r1`, `0..=255`.
    pub s1: i32,
    /// Output level at `r2`, `0..=255`.
    pub s2: i32,
}

impl Breakpoints {
    /// Create validated breakpoints.
    ///
    /// `s1 > s2` is accepted: an inverted middle segment is legal.
    pub fn new(r1: i32, r2: i32, s1: i32, s2: i32) -> StretchResult<Self> {
        validate(r1, r2, s1, s2)?;
        Ok(Self { r1, r2, s1, s2 })
    }

    /// Re-run validation on a value that may have been built by hand.
    pub fn validate(&self) -> StretchResult<()> {
        validate(self.r1, self.r2, self.s1, self.s2)
    }

    /// Derive the three segment slopes.
    #[inline]
    pub fn slopes(&self) -> Slopes {
        derive_slopes(self)
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            r1: 70,
            r2: 140,
            s1: 30,
            s2: 200,
        }
    }
}

impl fmt::Display for Breakpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "r1={}, r2={}, s1={}, s2={}",
            self.r1, self.r2, self.s1, self.s2
        )
    }
}

/// Check the breakpoint ordering and domains.
///
/// Bounds are checked in the order `r1`, `r2`, `s1`, `s2`; the first
/// violation is reported.
///
/// # Errors
///
/// [`StretchError::InvalidRange`] naming the parameter and its legal range.
pub fn validate(r1: i32, r2: i32, s1: i32, s2: i32) -> StretchResult<()> {
    if !(R1_MIN..=R1_MAX).contains(&r1) {
        return Err(StretchError::invalid_range("r1", r1, R1_MIN, R1_MAX));
    }
    if !(r1 + 1..=MAX_INTENSITY).contains(&r2) {
        return Err(StretchError::invalid_range("r2", r2, r1 + 1, MAX_INTENSITY));
    }
    if !(0..=MAX_INTENSITY).contains(&s1) {
        return Err(StretchError::invalid_range("s1", s1, 0, MAX_INTENSITY));
    }
    if !(0..=MAX_INTENSITY).contains(&s2) {
        return Err(StretchError::invalid_range("s2", s2, 0, MAX_INTENSITY));
    }
    Ok(())
}

/// Slopes of the three linear segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slopes {
    /// Slope below `r1`.
    pub alpha: f64,
    /// Slope on `[r1, r2)`.
    pub beta: f64,
    /// Slope on `[r2, 255]`.
    pub gamma: f64,
}

impl Slopes {
    /// `true` when every slope is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.alpha.is_finite() && self.beta.is_finite() && self.gamma.is_finite()
    }

    /// Copy rounded to `places` decimals for display.
    ///
    /// The engine always consumes the unrounded values.
    pub fn rounded(&self, places: u32) -> Self {
        let scale = 10f64.powi(places as i32);
        let round = |v: f64| (v * scale).round() / scale;
        Self {
            alpha: round(self.alpha),
            beta: round(self.beta),
            gamma: round(self.gamma),
        }
    }
}

impl fmt::Display for Slopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = DISPLAY_PRECISION as usize;
        write!(
            f,
            "α={:.p$}, β={:.p$}, γ={:.p$}",
            self.alpha,
            self.beta,
            self.gamma,
            p = p
        )
    }
}

/// Derive `(alpha, beta, gamma)` from breakpoints.
///
/// Pure arithmetic, no rounding:
///
/// ```text
/// alpha = s1 / r1
/// beta  = (s2 - s1) / (r2 - r1)
/// gamma = (255 - s2) / (255 - r2)
/// ```
///
/// With `r2 == 255` the upper segment holds only `u == 255`, which maps to
/// `s2`; `gamma` is `0.0` there instead of a division by zero.
///
/// Unvalidated input (`r1 == r2`, `r1 == 0`) yields non-finite slopes,
/// which [`crate::transform`] rejects.
pub fn derive_slopes(bp: &Breakpoints) -> Slopes {
    let r1 = f64::from(bp.r1);
    let r2 = f64::from(bp.r2);
    let s1 = f64::from(bp.s1);
    let s2 = f64::from(bp.s2);
    let max = f64::from(MAX_INTENSITY);

    let gamma = if bp.r2 == MAX_INTENSITY {
        0.0
    } else {
        (max - s2) / (max - r2)
    };

    Slopes {
        alpha: s1 / r1,
        beta: (s2 - s1) / (r2 - r1),
        gamma,
    }
}
