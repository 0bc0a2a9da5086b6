//! Image format detection and validation.

use crate::error::{Error, Result};
use image::ImageFormat;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Number of header bytes needed to sniff every supported format.
const HEADER_LEN: usize = 16;

/// Image formats accepted as page input.
const SUPPORTED: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Tiff,
    ImageFormat::Bmp,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Image format information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFormat {
    /// Detected container format
    pub format: ImageFormat,
}

impl PageFormat {
    /// MIME type of the detected format.
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Canonical file extension of the detected format.
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }
}

impl std::fmt::Display for PageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.format)
    }
}

/// Detect image format from a file path.
///
/// # Example
/// ```no_run
/// use unscan::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("scan.png").unwrap();
/// println!("Format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PageFormat> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut header = Vec::with_capacity(HEADER_LEN);
    reader.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect image format from the leading bytes of a file.
///
/// # Returns
/// * `Ok(PageFormat)` for a supported raster format
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PageFormat> {
    let format = image::guess_format(data).map_err(|_| Error::UnknownFormat)?;
    if !SUPPORTED.contains(&format) {
        return Err(Error::UnknownFormat);
    }
    Ok(PageFormat { format })
}

/// Check if a file is a supported image.
pub fn is_image<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes start with a supported image header.
pub fn is_image_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
