//! Text recognition collaborators.
//!
//! The pipeline never reads pixels as text itself. It hands pages and
//! region crops to a [`TextRecognizer`], which must return lines in
//! natural reading order.

mod tesseract;
mod timeout;

pub use tesseract::TesseractCli;
pub use timeout::TimeoutRecognizer;

use crate::error::RecognizeError;
use crate::model::Page;

/// Recognizes text in a page image.
pub trait TextRecognizer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str {
        "recognizer"
    }

    /// Recognize all text on `page`, lines separated by `\n`.
    fn recognize(&self, page: &Page) -> Result<String, RecognizeError>;
}

/// Recognizer backed by a closure.
pub struct FnRecognizer<F> {
    name: String,
    func: F,
}

impl<F> TextRecognizer for FnRecognizer<F>
where
    F: Fn(&Page) -> Result<String, RecognizeError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn recognize(&self, page: &Page) -> Result<String, RecognizeError> {
        (self.func)(page)
    }
}

/// Wrap a closure as a [`TextRecognizer`].
///
/// ```
/// use unscan::recognize::{from_fn, TextRecognizer};
///
/// let recognizer = from_fn("fixed", |_page| Ok("Hello".to_string()));
/// assert_eq!(recognizer.name(), "fixed");
/// ```
pub fn from_fn<F>(name: impl Into<String>, func: F) -> FnRecognizer<F>
where
    F: Fn(&Page) -> Result<String, RecognizeError> + Send + Sync,
{
    FnRecognizer {
        name: name.into(),
        func,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_fn_recognizer_sees_page() {
        let recognizer = from_fn("size", |page: &Page| {
            Ok(format!("{}x{}", page.width(), page.height()))
        });
        let page = Page::new(RgbImage::new(7, 3));
        assert_eq!(recognizer.recognize(&page).unwrap(), "7x3");
    }

    #[test]
    fn test_fn_recognizer_error() {
        let recognizer = from_fn("broken", |_: &Page| {
            Err(RecognizeError::Failed("no engine".into()))
        });
        let page = Page::new(RgbImage::new(1, 1));
        assert!(matches!(
            recognizer.recognize(&page),
            Err(RecognizeError::Failed(_))
        ));
    }
}
