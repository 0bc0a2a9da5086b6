//! Conversion options.

use std::time::Duration;

use crate::classify::{HeadingConfig, HeadingSource};
use crate::cleanup::{CleanupOptions, CleanupPreset};
use crate::detector::DetectorConfig;
use crate::error::Result;
use crate::substitute::SubstitutionMode;

/// How the converter treats a failing table recognition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Any recognition failure aborts the conversion
    #[default]
    Strict,
    /// Table recognition failures are logged and recorded in the document
    Lenient,
}

/// Options for page conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Failure handling for the table stage
    pub error_mode: ErrorMode,

    /// Run body and table recognition concurrently
    pub parallel: bool,

    /// Heading thresholds, source and markup
    pub heading: HeadingConfig,

    /// Strategy used to decorate headings in the body
    pub substitution: SubstitutionMode,

    /// Region detection parameters
    pub detector: DetectorConfig,

    /// Cleanup applied to recognized text (None = raw recognizer output)
    pub cleanup: Option<CleanupOptions>,

    /// Apply a global Otsu threshold to the suppressed page before body recognition
    pub binarize_body: bool,

    /// Deadline for each recognizer call
    pub recognition_timeout: Option<Duration>,

    /// Source label stored in the document metadata
    pub source: Option<String>,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Tolerate table recognition failures.
    pub fn lenient(self) -> Self {
        self.with_error_mode(ErrorMode::Lenient)
    }

    /// Enable or disable concurrent recognition.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run recognition stages one after another.
    pub fn sequential(self) -> Self {
        self.with_parallel(false)
    }

    /// Set the heading configuration.
    pub fn with_heading(mut self, heading: HeadingConfig) -> Self {
        self.heading = heading;
        self
    }

    /// Set the title length range.
    pub fn with_heading_sizes(mut self, min_size: usize, max_size: usize) -> Self {
        self.heading.min_size = min_size;
        self.heading.max_size = max_size;
        self
    }

    /// Set where headings are classified from.
    pub fn with_heading_source(mut self, source: HeadingSource) -> Self {
        self.heading.source = source;
        self
    }

    /// Set the substitution strategy.
    pub fn with_substitution(mut self, mode: SubstitutionMode) -> Self {
        self.substitution = mode;
        self
    }

    /// Set the region detector configuration.
    pub fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.detector = detector;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup from a preset.
    pub fn with_cleanup_preset(self, preset: CleanupPreset) -> Self {
        self.with_cleanup(CleanupOptions::from_preset(preset))
    }

    /// Pass recognized text through unchanged.
    pub fn without_cleanup(mut self) -> Self {
        self.cleanup = None;
        self
    }

    /// Enable or disable body binarization.
    pub fn with_binarize_body(mut self, binarize: bool) -> Self {
        self.binarize_body = binarize;
        self
    }

    /// Bound every recognizer call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.recognition_timeout = Some(timeout);
        self
    }

    /// Set the source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Check thresholds and detector parameters.
    pub fn validate(&self) -> Result<()> {
        self.heading.classifier()?;
        self.detector.validate()
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            parallel: true,
            heading: HeadingConfig::default(),
            substitution: SubstitutionMode::default(),
            detector: DetectorConfig::default(),
            cleanup: Some(CleanupOptions::default()),
            binarize_body: true,
            recognition_timeout: None,
            source: None,
        }
    }
}
