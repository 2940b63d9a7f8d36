//! JPEG decoding to intensities.
//!
//! Read-only: stretched output is always written as PNG.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use stretch_core::IntensityImage;
use tracing::debug;

use crate::luma::{luma_u8, scale_u16};
use crate::{IoError, IoResult};

/// Read a JPEG file as grayscale intensities.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<IntensityImage> {
    let file = File::open(path.as_ref())?;
    decode(file)
}

/// Decode JPEG bytes held in memory.
pub fn decode_bytes(bytes: &[u8]) -> IoResult<IntensityImage> {
    decode(bytes)
}

fn decode<R: Read>(reader: R) -> IoResult<IntensityImage> {
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(reader));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = usize::from(info.width);
    let height = usize::from(info.height);
    debug!(width, height, format = ?info.pixel_format, "decoded JPEG");

    let data: Vec<f32> = match info.pixel_format {
        jpeg_decoder::PixelFormat::L8 => pixels.iter().map(|&g| f32::from(g)).collect(),
        jpeg_decoder::PixelFormat::L16 => pixels
            .chunks_exact(2)
            .map(|l| scale_u16(u16::from_be_bytes([l[0], l[1]])))
            .collect(),
        jpeg_decoder::PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|p| f32::from(luma_u8(p[0], p[1], p[2])))
            .collect(),
        jpeg_decoder::PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .map(|cmyk| {
                let k = 1.0 - f32::from(cmyk[3]) / 255.0;
                let channel = |v: u8| ((1.0 - f32::from(v) / 255.0) * k * 255.0) as u8;
                f32::from(luma_u8(channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2])))
            })
            .collect(),
    };

    Ok(IntensityImage::new(width, height, data)?)
}
