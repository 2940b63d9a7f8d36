//! Slopes command
//!
//! Prints the derived slopes and the three segments of the curve.

use anyhow::Result;
use tracing::trace;

use crate::SlopesArgs;

pub fn run(args: SlopesArgs) -> Result<()> {
    trace!(curve = ?args.curve, "slopes::run");
    let curve = super::resolve_curve(&args.curve)?;

    println!("Breakpoints: {}", curve.breakpoints());
    println!("Slopes:      {}", curve.slopes());
    println!();
    println!("Segments:");
    for (name, seg) in ["alpha", "beta", "gamma"].iter().zip(curve.segments()) {
        println!(
            "  {:<5}  ({:>3}, {:>3}) -> ({:>3}, {:>3})  slope {:.3}",
            name, seg.start.0, seg.start.1, seg.end.0, seg.end.1, seg.slope
        );
    }

    Ok(())
}
