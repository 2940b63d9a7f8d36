//! PNG decoding to intensities and 8-bit grayscale encoding.
//!
//! Palette and sub-byte images are expanded by the decoder. Colour images
//! are reduced to luma, alpha is dropped, and 16-bit samples are rescaled
//! to the 8-bit range without rounding.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, BufRead, Seek, Write};
use std::path::Path;

use stretch_core::{IntensityImage, StretchedImage};
use tracing::debug;

use crate::luma::{luma_u16, luma_u8, scale_u16};
use crate::{IoError, IoResult};

/// Read a PNG file as grayscale intensities.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<IntensityImage> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decode PNG bytes held in memory.
pub fn decode_bytes(bytes: &[u8]) -> IoResult<IntensityImage> {
    decode(Cursor::new(bytes))
}

fn decode<R: BufRead + Seek>(reader: R) -> IoResult<IntensityImage> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    let width = info.width as usize;
    let height = info.height as usize;
    debug!(width, height, color = ?info.color_type, depth = ?info.bit_depth, "decoded PNG");

    let data: Vec<f32> = match (info.color_type, info.bit_depth) {
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            bytes.iter().map(|&g| f32::from(g)).collect()
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            bytes.chunks_exact(2).map(|ga| f32::from(ga[0])).collect()
        }
        (png::ColorType::Rgb, png::BitDepth::Eight) => bytes
            .chunks_exact(3)
            .map(|p| f32::from(luma_u8(p[0], p[1], p[2])))
            .collect(),
        (png::ColorType::Rgba, png::BitDepth::Eight) => bytes
            .chunks_exact(4)
            .map(|p| f32::from(luma_u8(p[0], p[1], p[2])))
            .collect(),
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => {
            bytes_to_u16(bytes).into_iter().map(scale_u16).collect()
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Sixteen) => bytes_to_u16(bytes)
            .chunks_exact(2)
            .map(|ga| scale_u16(ga[0]))
            .collect(),
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => bytes_to_u16(bytes)
            .chunks_exact(3)
            .map(|p| luma_u16(p[0], p[1], p[2]))
            .collect(),
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => bytes_to_u16(bytes)
            .chunks_exact(4)
            .map(|p| luma_u16(p[0], p[1], p[2]))
            .collect(),
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    Ok(IntensityImage::new(width, height, data)?)
}

/// Write an 8-bit grayscale PNG.
pub fn write<P: AsRef<Path>>(path: P, image: &StretchedImage) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    encode(BufWriter::new(file), image)
}

/// Encode an 8-bit grayscale PNG into memory, e.g. for a download button.
pub fn encode_bytes(image: &StretchedImage) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    encode(&mut out, image)?;
    Ok(out)
}

fn encode<W: Write>(writer: W, image: &StretchedImage) -> IoResult<()> {
    let width = u32::try_from(image.width)
        .map_err(|_| IoError::EncodeError(format!("width {} too large", image.width)))?;
    let height = u32::try_from(image.height)
        .map_err(|_| IoError::EncodeError(format!("height {} too large", image.height)))?;

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(&image.data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}

/// Converts big-endian byte slice to u16 vector.
fn bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}
