//! Heading classification.
//!
//! A [`LineClassifier`] assigns each recognized line a [`HeadingLevel`].
//! The stock strategy, [`LengthHeuristic`], uses trimmed character count
//! as a stand-in for rendered font size. That proxy conflates character
//! count with visual size: short all-caps titles and long small-font
//! captions are misclassified. Layout-aware classifiers can be plugged in
//! through the trait.

mod config;
mod length;

pub use config::{HeadingConfig, HeadingMarkup, HeadingSource};
pub use length::LengthHeuristic;

use crate::model::{ClassifiedLine, HeadingLevel, Headings, RecognizedText};

/// Strategy that assigns a heading level to a single line.
pub trait LineClassifier: Send + Sync {
    /// Classify one line of recognized text.
    fn classify(&self, line: &str) -> HeadingLevel;
}

/// Classify every line of `text`, keeping source order within each bucket.
pub fn classify_headings(text: &RecognizedText, classifier: &dyn LineClassifier) -> Headings {
    let headings: Headings = text
        .lines()
        .map(|line| ClassifiedLine::new(line, classifier.classify(line)))
        .collect();
    log::debug!(
        "classified {} lines: {} titles, {} subtitles",
        headings.len(),
        headings.titles.len(),
        headings.subtitles.len()
    );
    headings
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AllCaps;

    impl LineClassifier for AllCaps {
        fn classify(&self, line: &str) -> HeadingLevel {
            let line = line.trim();
            if !line.is_empty() && line.chars().all(|c| !c.is_lowercase()) {
                HeadingLevel::Title
            } else {
                HeadingLevel::Body
            }
        }
    }

    #[test]
    fn test_chapter_scenario() {
        let text = RecognizedText::from("Chapter One\nthis is a body line\nFig");
        let classifier = LengthHeuristic::new(8, 11).unwrap();

        let headings = classify_headings(&text, &classifier);
        assert_eq!(headings.titles, vec!["Chapter One"]);
        assert_eq!(headings.subtitles, vec!["Fig"]);
        assert_eq!(headings.body, vec!["this is a body line"]);
    }

    #[test]
    fn test_degenerate_thresholds_capture_everything() {
        let text = RecognizedText::from("a\n\n  spaced  \na much longer line of text");
        let classifier = LengthHeuristic::new(0, usize::MAX).unwrap();

        let headings = classify_headings(&text, &classifier);
        assert_eq!(headings.titles.len(), 4);
        assert!(headings.subtitles.is_empty());
        assert!(headings.body.is_empty());
    }

    #[test]
    fn test_order_preserved_per_bucket() {
        let text = RecognizedText::from("Beta\nxx\nAlpha\nyy");
        let classifier = LengthHeuristic::new(4, 5).unwrap();

        let headings = classify_headings(&text, &classifier);
        assert_eq!(headings.titles, vec!["Beta", "Alpha"]);
        assert_eq!(headings.subtitles, vec!["xx", "yy"]);
    }

    #[test]
    fn test_custom_classifier() {
        let text = RecognizedText::from("INTRODUCTION\nSome text here");
        let headings = classify_headings(&text, &AllCaps);
        assert_eq!(headings.titles, vec!["INTRODUCTION"]);
        assert_eq!(headings.body, vec!["Some text here"]);
    }
}
