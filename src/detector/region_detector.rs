//! Contour-based region detection.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

use crate::error::Result;
use crate::model::{Page, Region};

use super::threshold::{adaptive_mean_threshold_inv, ThresholdParams};

/// Regions to blank out before body recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct SuppressionConfig {
    /// Binarization for this pass
    pub threshold: ThresholdParams,
    /// Width must exceed this
    pub min_width: u32,
    /// Height must exceed this
    pub min_height: u32,
}

impl SuppressionConfig {
    /// Check a bounding box against the suppression predicate.
    pub fn matches(&self, region: &Region) -> bool {
        region.width > self.min_width && region.height > self.min_height
    }
}

impl Default for SuppressionConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdParams::new(11, 10),
            min_width: 100,
            min_height: 50,
        }
    }
}

/// Table candidate regions.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRegionConfig {
    /// Binarization for this pass
    pub threshold: ThresholdParams,
    /// Width / height must exceed this
    pub min_aspect_ratio: f64,
    /// Width * height must exceed this
    pub min_area: u64,
}

impl TableRegionConfig {
    /// Check a bounding box against the table predicate.
    pub fn matches(&self, region: &Region) -> bool {
        region.aspect_ratio() > self.min_aspect_ratio && region.area() > self.min_area
    }
}

impl Default for TableRegionConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdParams::new(11, 4),
            min_aspect_ratio: 3.0,
            min_area: 10_000,
        }
    }
}

/// Region detector configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorConfig {
    /// Suppression pass
    pub suppression: SuppressionConfig,
    /// Table pass
    pub table: TableRegionConfig,
}

impl DetectorConfig {
    /// Validate both threshold settings.
    pub fn validate(&self) -> Result<()> {
        self.suppression.threshold.validate()?;
        self.table.threshold.validate()
    }
}

/// Detects suppression and table regions on a page.
#[derive(Debug, Clone, Default)]
pub struct RegionDetector {
    config: DetectorConfig,
}

impl RegionDetector {
    /// Create a detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with custom configuration.
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Regions matching the suppression predicate, in contour order.
    pub fn suppression_regions(&self, page: &Page) -> Vec<Region> {
        let config = &self.config.suppression;
        let regions: Vec<Region> = external_boxes(&page.to_gray(), config.threshold)
            .into_iter()
            .filter(|r| config.matches(r))
            .collect();
        log::debug!("RegionDetector: {} suppression regions", regions.len());
        regions
    }

    /// Derive a copy of the page with suppression regions blanked.
    ///
    /// Returns the derived page and the regions that were blanked.
    pub fn suppress(&self, page: &Page) -> Result<(Page, Vec<Region>)> {
        let regions = self.suppression_regions(page);
        let suppressed = page.with_regions_blanked(&regions)?;
        Ok((suppressed, regions))
    }

    /// Table candidate regions, in contour order. Empty when none qualify.
    pub fn detect_tables(&self, page: &Page) -> Vec<Region> {
        let config = &self.config.table;
        let boxes = external_boxes(&page.to_gray(), config.threshold);
        let total = boxes.len();
        let tables: Vec<Region> = boxes.into_iter().filter(|r| config.matches(r)).collect();
        log::debug!(
            "RegionDetector: {} of {} contour boxes look like tables",
            tables.len(),
            total
        );
        tables
    }
}

/// Bounding boxes of the outermost contours of the binarized image.
fn external_boxes(gray: &GrayImage, params: ThresholdParams) -> Vec<Region> {
    let binary = adaptive_mean_threshold_inv(gray, params);
    find_contours::<u32>(&binary)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(|c| Region::bounding(c.points.iter().map(|p| (p.x, p.y))))
        .collect()
}
