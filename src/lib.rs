//! # unscan
//!
//! Scanned document image to Markdown conversion.
//!
//! A page image goes through region detection (table boxes and large
//! non-text regions), text recognition, heading classification by line
//! length, table parsing, and heading substitution. The result is a
//! [`Document`] that renders to Markdown or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unscan::{convert_file, render};
//!
//! fn main() -> unscan::Result<()> {
//!     // Recognize a scanned page with the tesseract executable
//!     let doc = convert_file("scan.png")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Region detection**: adaptive thresholding and external contours
//! - **Heading decoration**: titles and subtitles by trimmed line length
//! - **Table reconstruction**: first table region rendered as a pipe table
//! - **Pluggable recognition**: any [`TextRecognizer`], tesseract included
//! - **Parallel processing**: body and table recognition run on Rayon

pub mod classify;
pub mod cleanup;
pub mod convert;
pub mod detect;
pub mod detector;
pub mod error;
pub mod model;
pub mod parser;
pub mod recognize;
pub mod render;
pub mod substitute;

// Re-export commonly used types
pub use classify::{HeadingConfig, HeadingMarkup, HeadingSource, LengthHeuristic, LineClassifier};
pub use cleanup::{CleanupOptions, CleanupPreset};
pub use convert::{assemble, write_document, ConvertOptions, Converter, ErrorMode};
#[cfg(feature = "async")]
pub use convert::write_document_async;
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_image, PageFormat};
pub use detector::{DetectorConfig, RegionDetector};
pub use error::{Error, RecognizeError, Result, Stage};
pub use model::{
    ClassifiedLine, Document, HeadingLevel, Headings, Metadata, Page, RecognizedText, Region,
    Table, TableRow, TableSection,
};
pub use parser::parse_table;
pub use recognize::{TesseractCli, TextRecognizer};
pub use render::{JsonFormat, RenderOptions, TableFormat};
pub use substitute::SubstitutionMode;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Convert a scanned page image with default options.
///
/// Recognition uses the `tesseract` executable from `PATH`.
///
/// # Example
///
/// ```no_run
/// use unscan::convert_file;
///
/// let doc = convert_file("scan.png").unwrap();
/// println!("Titles: {:?}", doc.headings.titles);
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    convert_file_with_options(path, ConvertOptions::default())
}

/// Convert a scanned page image with custom options.
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ConvertOptions,
) -> Result<Document> {
    Converter::tesseract(options)?.convert_file(path)
}

/// Convert an encoded image held in memory with default options.
pub fn convert_bytes(data: &[u8]) -> Result<Document> {
    Converter::tesseract(ConvertOptions::default())?.convert_bytes(data)
}

/// Extract plain text from a scanned page.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = convert_file(path)?;
    Ok(doc.plain_text())
}

/// Convert a scanned page to Markdown.
///
/// # Example
///
/// ```no_run
/// use unscan::to_markdown;
///
/// let markdown = to_markdown("scan.png").unwrap();
/// std::fs::write("output.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    to_markdown_with_options(path, &RenderOptions::default())
}

/// Convert a scanned page to Markdown with custom render options.
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let doc = convert_file(path)?;
    render::to_markdown(&doc, options)
}

/// Convert a scanned page to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = convert_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for converting scanned pages.
///
/// # Example
///
/// ```no_run
/// use unscan::{SubstitutionMode, Unscan};
///
/// let markdown = Unscan::new()
///     .with_heading_sizes(8, 40)
///     .with_substitution(SubstitutionMode::Substring)
///     .with_frontmatter()
///     .lenient()
///     .convert("scan.png")?
///     .to_markdown()?;
/// # Ok::<(), unscan::Error>(())
/// ```
pub struct Unscan {
    convert_options: ConvertOptions,
    render_options: RenderOptions,
    recognizer: Option<Arc<dyn TextRecognizer>>,
    table_recognizer: Option<Arc<dyn TextRecognizer>>,
    classifier: Option<Arc<dyn LineClassifier>>,
}

impl Unscan {
    /// Create a new Unscan builder.
    pub fn new() -> Self {
        Self {
            convert_options: ConvertOptions::default(),
            render_options: RenderOptions::default(),
            recognizer: None,
            table_recognizer: None,
            classifier: None,
        }
    }

    /// Use `recognizer` instead of the tesseract executable.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Use a separate recognizer for table regions.
    pub fn with_table_recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.table_recognizer = Some(recognizer);
        self
    }

    /// Classify heading lines with `classifier` instead of by length.
    pub fn with_classifier(mut self, classifier: Arc<dyn LineClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Tolerate table recognition failures.
    pub fn lenient(mut self) -> Self {
        self.convert_options = self.convert_options.lenient();
        self
    }

    /// Disable parallel recognition.
    pub fn sequential(mut self) -> Self {
        self.convert_options = self.convert_options.sequential();
        self
    }

    /// Set the title length range.
    pub fn with_heading_sizes(mut self, min_size: usize, max_size: usize) -> Self {
        self.convert_options = self.convert_options.with_heading_sizes(min_size, max_size);
        self
    }

    /// Set where headings are classified from.
    pub fn with_heading_source(mut self, source: HeadingSource) -> Self {
        self.convert_options = self.convert_options.with_heading_source(source);
        self
    }

    /// Decorate subtitles as well as titles.
    pub fn with_subtitles(mut self) -> Self {
        self.convert_options.heading.decorate_subtitles = true;
        self
    }

    /// Set the substitution strategy.
    pub fn with_substitution(mut self, mode: SubstitutionMode) -> Self {
        self.convert_options = self.convert_options.with_substitution(mode);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.convert_options = self.convert_options.with_cleanup_preset(preset);
        self
    }

    /// Keep raw recognizer output.
    pub fn without_cleanup(mut self) -> Self {
        self.convert_options = self.convert_options.without_cleanup();
        self
    }

    /// Bound every recognizer call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.convert_options = self.convert_options.with_timeout(timeout);
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Set table output format.
    pub fn with_table_format(mut self, format: TableFormat) -> Self {
        self.render_options = self.render_options.with_table_format(format);
        self
    }

    /// Convert an image file and return a result wrapper.
    pub fn convert<P: AsRef<Path>>(self, path: P) -> Result<UnscanResult> {
        let (converter, render_options) = self.build()?;
        let document = converter.convert_file(path)?;
        Ok(UnscanResult {
            document,
            render_options,
        })
    }

    /// Convert an image from bytes.
    pub fn convert_bytes(self, data: &[u8]) -> Result<UnscanResult> {
        let (converter, render_options) = self.build()?;
        let document = converter.convert_bytes(data)?;
        Ok(UnscanResult {
            document,
            render_options,
        })
    }

    /// Convert a decoded page.
    pub fn convert_page(self, page: &Page) -> Result<UnscanResult> {
        let (converter, render_options) = self.build()?;
        let document = converter.convert(page)?;
        Ok(UnscanResult {
            document,
            render_options,
        })
    }

    fn build(self) -> Result<(Converter, RenderOptions)> {
        let converter = match (self.recognizer, self.table_recognizer) {
            (Some(body), Some(table)) => {
                Converter::with_recognizers(body, table, self.convert_options)?
            }
            (Some(body), None) => Converter::new(body, self.convert_options)?,
            (None, Some(table)) => {
                let mut body = TesseractCli::uniform_block();
                if let Some(timeout) = self.convert_options.recognition_timeout {
                    body = body.with_timeout(timeout);
                }
                Converter::with_recognizers(Arc::new(body), table, self.convert_options)?
            }
            (None, None) => Converter::tesseract(self.convert_options)?,
        };
        let converter = match self.classifier {
            Some(classifier) => converter.with_classifier(classifier),
            None => converter,
        };
        Ok((converter, self.render_options))
    }
}

impl Default for Unscan {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of converting a scanned page.
pub struct UnscanResult {
    /// The converted document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl UnscanResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Render Markdown and write it to `path`.
    pub fn write_markdown<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_document(&self.to_markdown()?, path)
    }

    /// Get plain text.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognize::from_fn;
    use image::{Rgb, RgbImage};

    fn white_page() -> Page {
        Page::new(RgbImage::from_pixel(200, 120, Rgb([255, 255, 255])))
    }

    fn fixed(text: &'static str) -> Arc<dyn TextRecognizer> {
        Arc::new(from_fn("fixed", move |_: &Page| Ok(text.to_string())))
    }

    #[test]
    fn test_unscan_builder() {
        let unscan = Unscan::new()
            .lenient()
            .with_frontmatter()
            .with_cleanup(CleanupPreset::Minimal);

        assert_eq!(unscan.convert_options.error_mode, ErrorMode::Lenient);
        assert_eq!(
            unscan.convert_options.cleanup,
            Some(CleanupOptions::minimal())
        );
        assert!(unscan.render_options.include_frontmatter);
    }

    #[test]
    fn test_unscan_builder_default() {
        let builder = Unscan::default();
        assert!(!builder.render_options.include_frontmatter);
        assert!(builder.convert_options.parallel);
        assert!(builder.recognizer.is_none());
    }

    #[test]
    fn test_unscan_builder_chained() {
        let builder = Unscan::new()
            .with_heading_sizes(5, 9)
            .with_subtitles()
            .with_substitution(SubstitutionMode::Substring)
            .with_table_format(TableFormat::Html)
            .with_timeout(Duration::from_secs(10))
            .sequential();

        assert_eq!(builder.convert_options.heading.min_size, 5);
        assert_eq!(builder.convert_options.heading.max_size, 9);
        assert!(builder.convert_options.heading.decorate_subtitles);
        assert_eq!(builder.render_options.table_format, TableFormat::Html);
        assert!(!builder.convert_options.parallel);
    }

    #[test]
    fn test_unscan_convert_page() {
        let result = Unscan::new()
            .with_recognizer(fixed("Report\nsome body text here"))
            .with_heading_sizes(6, 6)
            .convert_page(&white_page())
            .unwrap();

        assert_eq!(
            result.to_markdown().unwrap(),
            "# Report <br>\nsome body text here"
        );
        assert_eq!(result.document().headings.titles, vec!["Report"]);
    }

    #[test]
    fn test_unscan_custom_classifier() {
        struct Colon;
        impl LineClassifier for Colon {
            fn classify(&self, line: &str) -> HeadingLevel {
                if line.ends_with(':') {
                    HeadingLevel::Title
                } else {
                    HeadingLevel::Body
                }
            }
        }

        let result = Unscan::new()
            .with_recognizer(fixed("Findings:
all of them"))
            .with_classifier(Arc::new(Colon))
            .convert_page(&white_page())
            .unwrap();

        assert_eq!(result.document().headings.titles, vec!["Findings:"]);
        assert_eq!(result.document().body, "# Findings: <br>\nall of them");
    }

    #[test]
    fn test_unscan_invalid_sizes() {
        let result = Unscan::new()
            .with_recognizer(fixed(""))
            .with_heading_sizes(9, 1)
            .convert_page(&white_page());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_convert_bytes_empty_data() {
        let result = Unscan::new().with_recognizer(fixed("x")).convert_bytes(&[]);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_convert_bytes_unknown_magic() {
        let data = [0xFF, 0xFE, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let result = Unscan::new().with_recognizer(fixed("x")).convert_bytes(&data);
        assert!(result.is_err());
    }

    #[test]
    fn test_detect_format_empty_data() {
        assert!(matches!(
            detect_format_from_bytes(&[]),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_json_format_variants() {
        let result = Unscan::new()
            .with_recognizer(fixed("x"))
            .convert_page(&white_page())
            .unwrap();
        let pretty = result.to_json(JsonFormat::Pretty).unwrap();
        let compact = result.to_json(JsonFormat::Compact).unwrap();
        assert!(pretty.len() > compact.len());
    }
}
