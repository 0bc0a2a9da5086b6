//! Page conversion pipeline.
//!
//! A [`Converter`] runs one page through region detection, recognition,
//! heading classification, table parsing and substitution, and returns a
//! [`Document`] ready for rendering.
//!
//! # Example
//!
//! ```no_run
//! use unscan::convert::{ConvertOptions, Converter};
//! use unscan::render::{to_markdown, RenderOptions};
//!
//! fn main() -> unscan::Result<()> {
//!     let converter = Converter::tesseract(ConvertOptions::default())?;
//!     let doc = converter.convert_file("scan.png")?;
//!     println!("{}", to_markdown(&doc, &RenderOptions::default())?);
//!     Ok(())
//! }
//! ```

mod options;
mod output;

pub use output::{assemble, write_document};
#[cfg(feature = "async")]
pub use output::write_document_async;
pub use options::{ConvertOptions, ErrorMode};

use std::path::Path;
use std::sync::Arc;

use crate::classify::{classify_headings, HeadingSource, LineClassifier};
use crate::cleanup::CleanupPipeline;
use crate::detector::{otsu_binarize, RegionDetector};
use crate::error::{Error, Result, Stage};
use crate::model::{Document, Metadata, Page, RecognizedText, Region, TableSection};
use crate::parser::parse_table;
use crate::recognize::{TesseractCli, TextRecognizer, TimeoutRecognizer};

/// Converts page images into documents.
pub struct Converter {
    body_recognizer: Arc<dyn TextRecognizer>,
    table_recognizer: Arc<dyn TextRecognizer>,
    detector: RegionDetector,
    classifier: Arc<dyn LineClassifier>,
    cleanup: Option<CleanupPipeline>,
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter that uses one recognizer for every stage.
    ///
    /// Fails with [`Error::InvalidConfig`] when the options are inconsistent.
    pub fn new(recognizer: Arc<dyn TextRecognizer>, options: ConvertOptions) -> Result<Self> {
        options.validate()?;
        let classifier: Arc<dyn LineClassifier> = Arc::new(options.heading.classifier()?);
        let recognizer = bounded(recognizer, &options);

        Ok(Self {
            body_recognizer: Arc::clone(&recognizer),
            table_recognizer: recognizer,
            detector: RegionDetector::with_config(options.detector.clone()),
            classifier,
            cleanup: options.cleanup.clone().map(CleanupPipeline::new),
            options,
        })
    }

    /// Create a converter backed by the `tesseract` executable.
    ///
    /// Body text is read as a single uniform block; tables use the engine
    /// defaults. A configured recognition timeout also kills the child
    /// process once it expires.
    pub fn tesseract(options: ConvertOptions) -> Result<Self> {
        let mut body = TesseractCli::uniform_block();
        let mut table = TesseractCli::new();
        if let Some(timeout) = options.recognition_timeout {
            body = body.with_timeout(timeout);
            table = table.with_timeout(timeout);
        }
        Self::with_recognizers(Arc::new(body), Arc::new(table), options)
    }

    /// Create a converter with separate body and table recognizers.
    pub fn with_recognizers(
        body: Arc<dyn TextRecognizer>,
        table: Arc<dyn TextRecognizer>,
        options: ConvertOptions,
    ) -> Result<Self> {
        let mut converter = Self::new(body, options)?;
        converter.table_recognizer = bounded(table, &converter.options);
        Ok(converter)
    }

    /// Replace the heading classifier.
    ///
    /// The configured heading sizes only feed the default
    /// [`LengthHeuristic`](crate::classify::LengthHeuristic); a custom
    /// classifier decides on its own.
    pub fn with_classifier(mut self, classifier: Arc<dyn LineClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Current options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Region detector used by this converter.
    pub fn detector(&self) -> &RegionDetector {
        &self.detector
    }

    /// Convert an image file.
    ///
    /// The file name becomes the metadata source unless one was configured.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        let page = Page::open(path)?;
        let source = self.options.source.clone().or_else(|| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        });
        self.run(&page, source)
    }

    /// Convert an encoded image held in memory.
    pub fn convert_bytes(&self, data: &[u8]) -> Result<Document> {
        let page = Page::decode(data)?;
        self.run(&page, self.options.source.clone())
    }

    /// Convert a decoded page.
    pub fn convert(&self, page: &Page) -> Result<Document> {
        self.run(page, self.options.source.clone())
    }

    fn run(&self, page: &Page, source: Option<String>) -> Result<Document> {
        log::debug!(
            "converting {}x{} page (body: {}, table: {})",
            page.width(),
            page.height(),
            self.body_recognizer.name(),
            self.table_recognizer.name()
        );

        let (suppressed, blanked) = self.detector.suppress(page)?;
        let table_regions = self.detector.detect_tables(page);

        let (body, table) = if self.options.parallel {
            rayon::join(
                || self.recognize_body(&suppressed),
                || self.recognize_table(page, &table_regions),
            )
        } else {
            (
                self.recognize_body(&suppressed),
                self.recognize_table(page, &table_regions),
            )
        };
        let body = body?;
        let table = table?;

        let headings = match self.options.heading.source {
            HeadingSource::Body => classify_headings(&body, self.classifier.as_ref()),
            HeadingSource::FullPage => {
                let text = self
                    .body_recognizer
                    .recognize(page)
                    .map_err(|e| Error::recognition(Stage::Headings, e))?;
                classify_headings(&self.clean(text), self.classifier.as_ref())
            }
        };

        let heading = &self.options.heading;
        let (matches, replacements) = heading
            .markup
            .substitution_pairs(&headings, heading.decorate_subtitles);
        let body = self
            .options
            .substitution
            .apply(body.as_str(), &matches, &replacements)?;

        let mut metadata = Metadata::for_page(page.width(), page.height());
        metadata.source = source;
        metadata.suppressed_regions = blanked.len();
        metadata.table_regions = table_regions;

        Ok(Document::new(metadata, body, headings, table))
    }

    fn recognize_body(&self, suppressed: &Page) -> Result<RecognizedText> {
        let binarized;
        let page = if self.options.binarize_body {
            binarized = Page::from_gray(&otsu_binarize(&suppressed.to_gray()));
            &binarized
        } else {
            suppressed
        };

        let text = self
            .body_recognizer
            .recognize(page)
            .map_err(|e| Error::recognition(Stage::Body, e))?;
        Ok(self.clean(text))
    }

    /// Try candidate regions in order; the first that parses to rows wins.
    fn recognize_table(&self, page: &Page, regions: &[Region]) -> Result<TableSection> {
        let Some(first) = regions.first() else {
            log::warn!("no table region detected; emitting body only");
            return Ok(TableSection::NotFound);
        };

        let mut failure = None;
        for region in regions {
            let crop = page.crop(region)?;
            let text = match self.table_recognizer.recognize(&crop) {
                Ok(text) => text,
                Err(e) => match self.options.error_mode {
                    ErrorMode::Strict => return Err(Error::recognition(Stage::Table, e)),
                    ErrorMode::Lenient => {
                        log::warn!("table recognition failed for {}: {}", region, e);
                        failure.get_or_insert((*region, e.to_string()));
                        continue;
                    }
                },
            };

            let table = parse_table(&self.clean(text));
            if !table.is_empty() {
                log::debug!(
                    "table at {}: {} rows, {} columns",
                    region,
                    table.row_count(),
                    table.max_width()
                );
                return Ok(TableSection::Found {
                    region: *region,
                    table,
                });
            }
            log::debug!("table region {} produced no rows", region);
        }

        if let Some((region, message)) = failure {
            return Ok(TableSection::Failed { region, message });
        }
        log::warn!("table regions produced no rows; emitting body only");
        Ok(TableSection::Empty { region: *first })
    }

    fn clean(&self, text: String) -> RecognizedText {
        match self.cleanup {
            Some(ref pipeline) => RecognizedText::new(pipeline.process(&text)),
            None => RecognizedText::new(text),
        }
    }
}

fn bounded(recognizer: Arc<dyn TextRecognizer>, options: &ConvertOptions) -> Arc<dyn TextRecognizer> {
    match options.recognition_timeout {
        Some(timeout) => Arc::new(TimeoutRecognizer::new(recognizer, timeout)),
        None => recognizer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecognizeError;
    use crate::recognize::from_fn;
    use crate::substitute::SubstitutionMode;
    use image::{Rgb, RgbImage};
    use imageproc::drawing::draw_hollow_rect_mut;
    use imageproc::rect::Rect;

    fn blank_page() -> Page {
        Page::new(RgbImage::from_pixel(300, 200, Rgb([255, 255, 255])))
    }

    fn table_page() -> Page {
        let mut image = RgbImage::from_pixel(500, 400, Rgb([255, 255, 255]));
        draw_hollow_rect_mut(&mut image, Rect::at(40, 200).of_size(400, 80), Rgb([0, 0, 0]));
        draw_hollow_rect_mut(&mut image, Rect::at(41, 201).of_size(398, 78), Rgb([0, 0, 0]));
        Page::new(image)
    }

    fn fixed(text: &'static str) -> Arc<dyn TextRecognizer> {
        Arc::new(from_fn("fixed", move |_: &Page| Ok(text.to_string())))
    }

    #[test]
    fn test_no_table_keeps_body() {
        let options = ConvertOptions::new()
            .with_heading_sizes(8, 11)
            .with_substitution(SubstitutionMode::Substring);
        let converter = Converter::new(fixed("Chapter One\nthis is a body line\nFig"), options).unwrap();
        let doc = converter.convert(&blank_page()).unwrap();

        assert_eq!(doc.body, "# Chapter One <br>\nthis is a body line\nFig");
        assert_eq!(doc.table, TableSection::NotFound);
        assert_eq!(doc.headings.titles, vec!["Chapter One"]);
        assert_eq!(doc.headings.subtitles, vec!["Fig"]);
    }

    #[test]
    fn test_table_region_found() {
        let converter = Converter::with_recognizers(
            fixed("plain body"),
            fixed("Name Age\nAnn 30"),
            ConvertOptions::default(),
        )
        .unwrap();
        let doc = converter.convert(&table_page()).unwrap();

        let table = doc.table().unwrap();
        assert_eq!(table.to_grid(), vec![vec!["Name", "Age"], vec!["Ann", "30"]]);
        assert_eq!(doc.metadata.table_regions.len(), 1);
    }

    #[test]
    fn test_strict_table_failure_is_table_stage() {
        let failing: Arc<dyn TextRecognizer> = Arc::new(from_fn("broken", |_: &Page| {
            Err(RecognizeError::Failed("engine error".into()))
        }));
        let converter =
            Converter::with_recognizers(fixed("body"), failing, ConvertOptions::default()).unwrap();

        match converter.convert(&table_page()) {
            Err(Error::Recognition { stage, .. }) => assert_eq!(stage, Stage::Table),
            other => panic!("expected table recognition error, got {:?}", other.map(|d| d.body)),
        }
    }

    #[test]
    fn test_lenient_table_failure_keeps_body() {
        let failing: Arc<dyn TextRecognizer> = Arc::new(from_fn("broken", |_: &Page| {
            Err(RecognizeError::Failed("engine error".into()))
        }));
        let converter =
            Converter::with_recognizers(fixed("body"), failing, ConvertOptions::new().lenient())
                .unwrap();
        let doc = converter.convert(&table_page()).unwrap();

        assert_eq!(doc.body, "body");
        assert!(matches!(doc.table, TableSection::Failed { .. }));
        assert!(doc.table_issue().is_some());
    }

    #[test]
    fn test_body_failure_is_fatal_even_when_lenient() {
        let failing: Arc<dyn TextRecognizer> = Arc::new(from_fn("broken", |_: &Page| {
            Err(RecognizeError::Failed("engine error".into()))
        }));
        let converter = Converter::new(failing, ConvertOptions::new().lenient()).unwrap();

        match converter.convert(&blank_page()) {
            Err(Error::Recognition { stage, .. }) => assert_eq!(stage, Stage::Body),
            other => panic!("expected body recognition error, got {:?}", other.map(|d| d.body)),
        }
    }

    #[test]
    fn test_blank_table_text_is_empty_section() {
        let converter = Converter::with_recognizers(
            fixed("body"),
            fixed("  \n\n"),
            ConvertOptions::default().sequential(),
        )
        .unwrap();
        let doc = converter.convert(&table_page()).unwrap();
        assert!(matches!(doc.table, TableSection::Empty { .. }));
        assert!(matches!(doc.table_issue(), Some(Error::MalformedTable(_))));
    }

    #[test]
    fn test_full_page_heading_source() {
        // Only the unsuppressed page still shows the box corner.
        let recognizer: Arc<dyn TextRecognizer> = Arc::new(from_fn("corner", |page: &Page| {
            let corner = page.height() > 200 && page.image().get_pixel(40, 200)[0] == 0;
            if corner {
                Ok("Heading\nbody words here".to_string())
            } else {
                Ok("body words here".to_string())
            }
        }));
        let options = ConvertOptions::new()
            .with_heading_sizes(1, 7)
            .with_heading_source(HeadingSource::FullPage)
            .without_cleanup()
            .lenient();
        let converter = Converter::new(recognizer, options).unwrap();
        let doc = converter.convert(&table_page()).unwrap();

        assert_eq!(doc.headings.titles, vec!["Heading"]);
        assert_eq!(doc.body, "body words here");
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        let options = ConvertOptions::new().with_heading_sizes(10, 2);
        assert!(matches!(
            Converter::new(fixed(""), options),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_source_label() {
        let converter =
            Converter::new(fixed("x"), ConvertOptions::new().with_source("scan.png")).unwrap();
        let doc = converter.convert(&blank_page()).unwrap();
        assert_eq!(doc.metadata.source.as_deref(), Some("scan.png"));
        assert!(doc.metadata.converted.is_some());
    }
}
