//! Page region detection.
//!
//! Finds rectangular regions on a page by binarizing it with an adaptive
//! mean threshold and taking the bounding boxes of external contours. Two
//! independent predicates run over independently thresholded images: one
//! picks regions to blank out before body recognition, the other picks
//! table candidates.

mod region_detector;
mod threshold;

pub use region_detector::{DetectorConfig, RegionDetector, SuppressionConfig, TableRegionConfig};
pub use threshold::{adaptive_mean_threshold_inv, otsu_binarize, ThresholdParams};
