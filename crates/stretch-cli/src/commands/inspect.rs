//! Inspect command
//!
//! Prints the top-left pixel window before and after the stretch, with
//! the selected pixel bracketed, then that pixel's two values.

use anyhow::Result;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

use stretch_core::{InspectionGrid, PixelPair};

use crate::InspectArgs;

pub fn run(args: InspectArgs) -> Result<()> {
    trace!(input = %args.input.display(), x = args.x, y = args.y, grid = args.grid, "inspect::run");

    let curve = super::resolve_curve(&args.curve)?;
    let image = super::load_image(&args.input)?;
    let output = curve.apply(&image)?;

    let grid = InspectionGrid::new(&image, &output, args.grid)?;
    let selected = grid.lookup(args.x, args.y)?;
    let (rows, cols) = grid.shape();
    info!(rows, cols, "Inspecting window");

    let cells = grid.rows();
    println!("Input Grid ({}x{})", rows, cols);
    print_grid(&cells, &selected, |p| p.input);
    println!();
    println!("Output Grid ({}x{})", rows, cols);
    print_grid(&cells, &selected, |p| p.output);
    println!();
    println!("Selected Pixel Coordinate: (x={}, y={})", selected.x, selected.y);
    println!("Input Pixel Value: {}", selected.input);
    println!("Output Pixel Value: {}", selected.output);

    Ok(())
}

fn print_grid(cells: &[Vec<PixelPair>], selected: &PixelPair, value: impl Fn(&PixelPair) -> i32) {
    let cols = cells.first().map_or(0, Vec::len);
    let header: String = (0..cols).map(|y| format!(" {:>4} ", y)).collect();
    println!("  y {}", header);
    for (x, row) in cells.iter().enumerate() {
        let line: String = row
            .iter()
            .map(|p| {
                if p.x == selected.x && p.y == selected.y {
                    format!("[{:>4}]", value(p))
                } else {
                    format!(" {:>4} ", value(p))
                }
            })
            .collect();
        println!("{:>3} {}", x, line);
    }
}
