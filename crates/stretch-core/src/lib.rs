//! # stretch-core
//!
//! Three-segment piecewise-linear contrast stretching for grayscale images.
//!
//! Each input intensity `u` is mapped through a curve defined by two
//! breakpoints `r1 < r2` and their output levels `s1`, `s2`:
//!
//! - [`params`] - [`Breakpoints`] validation and [`Slopes`] derivation
//! - [`engine`] - the per-pixel mapping, [`transform`], and [`StretchCurve`]
//! - [`inspect`] - before/after lookup in a small pixel window
//! - [`image`] - row-major input and output grids
//! - [`preset`] - YAML presets
//!
//! # Example
//!
//! ```rust
//! use stretch_core::{Breakpoints, IntensityImage, lookup, transform};
//!
//! let bp = Breakpoints::new(70, 140, 30, 200)?;
//! let slopes = bp.slopes();
//!
//! let input = IntensityImage::from_u8(2, 2, &[0, 70, 140, 255])?;
//! let output = transform(&input, &slopes, &bp)?;
//!
//! let pair = lookup(&input, &output, 1, 0, 10)?;
//! assert_eq!((pair.input, pair.output), (140, 200));
//! # Ok::<(), stretch_core::StretchError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - process rows with rayon (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod engine;
pub mod image;
pub mod inspect;
pub mod params;
pub mod preset;

pub use engine::{check_preconditions, clamp_to_u8, evaluate, transform, Segment, StretchCurve};
pub use error::{StretchError, StretchResult};
pub use image::{IntensityImage, StretchedImage};
pub use inspect::{lookup, InspectionGrid, PixelPair, DEFAULT_GRID_SIZE};
pub use params::{derive_slopes, validate, Breakpoints, Slopes, MAX_INTENSITY};
pub use preset::{Overrides, Preset};
