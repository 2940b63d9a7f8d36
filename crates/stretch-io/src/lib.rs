//! # stretch-io
//!
//! Image I/O for the contrast stretcher.
//!
//! Inputs are decoded straight to a single-channel [`IntensityImage`]:
//! colour images are reduced to luma and alpha is dropped. Outputs are
//! written as 8-bit grayscale PNG.
//!
//! | Format | Read | Write | Bit Depths |
//! |--------|------|-------|------------|
//! | PNG    | Yes  | Yes   | 1-16 in, 8 out |
//! | JPEG   | Yes  | No    | 8, 16 |
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use stretch_io::{read_gray, write_gray};
//!
//! let input = read_gray("scan.jpg")?;
//! write_gray("enhanced_image.png", &output)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod detect;
pub mod jpeg;
pub mod luma;
pub mod png;

use std::path::Path;

pub use detect::{Format, ACCEPTED_EXTENSIONS};
pub use error::{IoError, IoResult};
use stretch_core::{IntensityImage, StretchedImage};

/// Read any supported image as grayscale intensities.
pub fn read_gray<P: AsRef<Path>>(path: P) -> IoResult<IntensityImage> {
    let path = path.as_ref();
    match Format::of_file(path)? {
        Some(Format::Png) => png::read(path),
        Some(Format::Jpeg) => jpeg::read(path),
        None => Err(IoError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Write an 8-bit grayscale PNG.
pub fn write_gray<P: AsRef<Path>>(path: P, image: &StretchedImage) -> IoResult<()> {
    png::write(path, image)
}

/// Encode an 8-bit grayscale PNG into memory.
pub fn encode_gray_png(image: &StretchedImage) -> IoResult<Vec<u8>> {
    png::encode_bytes(image)
}
