//! Page image type.

use crate::error::{Error, Result};
use image::{imageops, DynamicImage, GrayImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::io::Cursor;
use std::path::Path;

use super::Region;

/// Fill color used when blanking regions out of a page.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// A decoded page image.
///
/// Pages are never mutated in place; operations that remove content
/// return a new derived page.
#[derive(Debug, Clone)]
pub struct Page {
    image: RgbImage,
}

impl Page {
    /// Wrap an RGB image.
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Decode a page from encoded image bytes (PNG, JPEG, TIFF, ...).
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::Decode("empty input".to_string()));
        }
        let image = image::load_from_memory(data)?;
        Ok(Self::from(image))
    }

    /// Read and decode a page image from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::decode(&data)
    }

    /// Page width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Page height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying RGB buffer.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Luma conversion of the page.
    pub fn to_gray(&self) -> GrayImage {
        imageops::grayscale(&self.image)
    }

    /// Check if a region lies entirely within this page.
    pub fn contains(&self, region: &Region) -> bool {
        region.fits_within(self.width(), self.height())
    }

    fn check_region(&self, region: &Region) -> Result<()> {
        if self.contains(region) {
            Ok(())
        } else {
            Err(Error::InvalidRegion {
                region: *region,
                page_width: self.width(),
                page_height: self.height(),
            })
        }
    }

    /// Copy a region out into a new page.
    pub fn crop(&self, region: &Region) -> Result<Page> {
        self.check_region(region)?;
        let view = imageops::crop_imm(
            &self.image,
            region.x,
            region.y,
            region.width,
            region.height,
        );
        Ok(Page::new(view.to_image()))
    }

    /// Derive a copy of the page with every region painted in background color.
    pub fn with_regions_blanked(&self, regions: &[Region]) -> Result<Page> {
        let mut image = self.image.clone();
        for region in regions {
            self.check_region(region)?;
            // In-bounds regions always fit in i32 coordinates.
            let rect = Rect::at(region.x as i32, region.y as i32).of_size(region.width, region.height);
            draw_filled_rect_mut(&mut image, rect, BACKGROUND);
        }
        Ok(Page::new(image))
    }

    /// Derive a copy of the page from a processed luma image of the same size.
    pub fn from_gray(gray: &GrayImage) -> Page {
        Page::new(DynamicImage::ImageLuma8(gray.clone()).to_rgb8())
    }

    /// Encode the page as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.image.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

impl From<DynamicImage> for Page {
    fn from(image: DynamicImage) -> Self {
        Self::new(image.to_rgb8())
    }
}

impl From<RgbImage> for Page {
    fn from(image: RgbImage) -> Self {
        Self::new(image)
    }
}
