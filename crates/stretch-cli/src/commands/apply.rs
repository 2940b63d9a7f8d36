//! Apply command
//!
//! Stretches one image and writes the 8-bit result as PNG.

use anyhow::Result;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

use crate::ApplyArgs;

pub fn run(args: ApplyArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "apply::run");

    let curve = super::resolve_curve(&args.curve)?;
    let image = super::load_image(&args.input)?;

    info!(
        w = image.width,
        h = image.height,
        breakpoints = %curve.breakpoints(),
        "Applying stretch"
    );

    let output = curve.apply(&image)?;
    super::save_image(&args.output, &output)?;

    println!("{}", curve.slopes());
    if verbose > 0 {
        println!(
            "{} ({}x{}) -> {}",
            args.input.display(),
            image.width,
            image.height,
            args.output.display()
        );
    }

    Ok(())
}
