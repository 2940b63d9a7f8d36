//! Recognising the accepted upload types.
//!
//! Only PNG and JPEG are accepted, under the extensions in
//! [`ACCEPTED_EXTENSIONS`]. A file is identified by its signature first, so
//! a mislabelled upload still decodes. The extension is consulted only when
//! the signature is not recognised.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::IoResult;

/// File extensions accepted as input, lower case.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "png", "jpeg"];

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
/// Start-of-image marker plus the first byte of the next marker.
const JPEG_SOI: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Bytes needed to tell the accepted formats apart.
const SNIFF_LEN: u64 = 8;

/// An accepted input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Portable Network Graphics.
    Png,
    /// JPEG/JFIF.
    Jpeg,
}

impl Format {
    const SIGNATURES: [(&'static [u8], Format); 2] =
        [(PNG_SIGNATURE, Format::Png), (JPEG_SOI, Format::Jpeg)];

    /// Identify a file on disk, or `None` if it is not an accepted type.
    pub fn of_file<P: AsRef<Path>>(path: P) -> IoResult<Option<Self>> {
        let path = path.as_ref();
        let mut head = Vec::with_capacity(SNIFF_LEN as usize);
        File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;
        Ok(Self::sniff(&head).or_else(|| Self::of_extension(path)))
    }

    /// Match the leading bytes of a file against the known signatures.
    pub fn sniff(head: &[u8]) -> Option<Self> {
        Self::SIGNATURES
            .iter()
            .find(|(sig, _)| head.starts_with(sig))
            .map(|&(_, format)| format)
    }

    /// Map an accepted extension to its format, ignoring case.
    pub fn of_extension<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }
        Some(if ext == "png" { Format::Png } else { Format::Jpeg })
    }
}
