//! CLI command implementations

pub mod apply;
pub mod inspect;
pub mod slopes;

use std::path::Path;

use anyhow::{Context, Result};
use stretch_core::{Breakpoints, IntensityImage, Overrides, Preset, StretchCurve, StretchedImage};
use tracing::debug;

use crate::CurveArgs;

/// Load image from path as grayscale intensities
pub fn load_image(path: &Path) -> Result<IntensityImage> {
    stretch_io::read_gray(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save stretched image to path
pub fn save_image(path: &Path, image: &StretchedImage) -> Result<()> {
    stretch_io::write_gray(path, image)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Build the curve from the preset (if any) and explicit flags.
pub fn resolve_curve(args: &CurveArgs) -> Result<StretchCurve> {
    let base = match &args.preset {
        Some(path) => {
            let preset = Preset::from_file(path)
                .with_context(|| format!("Failed to load preset: {}", path.display()))?;
            debug!(name = %preset.name, breakpoints = %preset.breakpoints, "using preset");
            preset.breakpoints
        }
        None => Breakpoints::default(),
    };

    let overrides = Overrides {
        r1: args.r1,
        r2: args.r2,
        s1: args.s1,
        s2: args.s2,
    };
    let breakpoints = overrides.apply(base).context("Invalid breakpoints")?;
    Ok(StretchCurve::new(breakpoints)?)
}
