//! Binarization routines.

use crate::error::{Error, Result};
use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;

const FOREGROUND: Luma<u8> = Luma([255]);
const BACKGROUND: Luma<u8> = Luma([0]);

/// Parameters for adaptive mean thresholding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdParams {
    /// Side of the square neighbourhood (odd, at least 3)
    pub block_size: u32,
    /// Constant subtracted from the neighbourhood mean
    pub offset: i32,
}

impl ThresholdParams {
    /// Create threshold parameters.
    pub const fn new(block_size: u32, offset: i32) -> Self {
        Self { block_size, offset }
    }

    /// Check that the neighbourhood is an odd size of at least 3.
    pub fn validate(&self) -> Result<()> {
        if self.block_size < 3 || self.block_size % 2 == 0 {
            return Err(Error::InvalidConfig(format!(
                "threshold block size must be odd and >= 3, got {}",
                self.block_size
            )));
        }
        Ok(())
    }
}

/// Inverted adaptive mean threshold.
///
/// A pixel becomes foreground (255) when its value is at most the mean of
/// its `block_size` neighbourhood minus `offset`, so dark ink on a light
/// page turns white. Neighbourhoods are clipped at the image border, so
/// edge pixels average over fewer neighbours. OpenCV's `adaptiveThreshold`
/// replicates the border instead, which can flip faint marks within
/// `block_size / 2` pixels of the edge.
pub fn adaptive_mean_threshold_inv(gray: &GrayImage, params: ThresholdParams) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut output = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return output;
    }

    let integral = IntegralImage::new(gray);
    let radius = params.block_size / 2;
    let offset = i64::from(params.offset);

    for y in 0..height {
        let top = y.saturating_sub(radius);
        let bottom = (y + radius).min(height - 1);
        for x in 0..width {
            let left = x.saturating_sub(radius);
            let right = (x + radius).min(width - 1);

            let count = i64::from((right - left + 1) * (bottom - top + 1));
            let sum = integral.sum(left, top, right, bottom) as i64;
            let value = i64::from(gray.get_pixel(x, y)[0]);

            // value <= sum / count - offset, kept in integers
            let pixel = if value * count <= sum - offset * count {
                FOREGROUND
            } else {
                BACKGROUND
            };
            output.put_pixel(x, y, pixel);
        }
    }

    output
}

/// Global Otsu binarization: pixels above the Otsu level become white.
pub fn otsu_binarize(gray: &GrayImage) -> GrayImage {
    let level = otsu_level(gray);
    log::debug!("otsu level {}", level);
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] > level {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Summed-area table with a zero row and column in front.
struct IntegralImage {
    stride: usize,
    sums: Vec<u64>,
}

impl IntegralImage {
    fn new(gray: &GrayImage) -> Self {
        let (width, height) = gray.dimensions();
        let stride = width as usize + 1;
        let mut sums = vec![0u64; stride * (height as usize + 1)];

        for y in 0..height as usize {
            let mut row_sum = 0u64;
            for x in 0..width as usize {
                row_sum += u64::from(gray.get_pixel(x as u32, y as u32)[0]);
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row_sum;
            }
        }

        Self { stride, sums }
    }

    /// Sum over the inclusive rectangle `[left, right] x [top, bottom]`.
    fn sum(&self, left: u32, top: u32, right: u32, bottom: u32) -> u64 {
        let (l, t) = (left as usize, top as usize);
        let (r, b) = (right as usize + 1, bottom as usize + 1);
        self.sums[b * self.stride + r] + self.sums[t * self.stride + l]
            - self.sums[t * self.stride + r]
            - self.sums[b * self.stride + l]
    }
}
