//! Heading classification configuration.

use crate::error::Result;
use crate::model::Headings;

use super::LengthHeuristic;

/// Which recognized text headings are classified from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingSource {
    /// The body text of the suppressed page
    #[default]
    Body,
    /// A separate recognition pass over the full, unsuppressed page
    FullPage,
}

/// Markdown decoration applied to heading lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMarkup {
    /// Prefix for titles
    pub title_prefix: String,
    /// Prefix for subtitles
    pub subtitle_prefix: String,
    /// Suffix for both levels
    pub suffix: String,
}

impl HeadingMarkup {
    /// Decorate a title line.
    pub fn title(&self, text: &str) -> String {
        format!("{}{}{}", self.title_prefix, text, self.suffix)
    }

    /// Decorate a subtitle line.
    pub fn subtitle(&self, text: &str) -> String {
        format!("{}{}{}", self.subtitle_prefix, text, self.suffix)
    }

    /// Build parallel `(matches, replacements)` lists from classified headings.
    ///
    /// Titles come first, then subtitles when `include_subtitles` is set.
    /// Heading text is trimmed and blank headings are skipped.
    pub fn substitution_pairs(
        &self,
        headings: &Headings,
        include_subtitles: bool,
    ) -> (Vec<String>, Vec<String>) {
        let mut matches = Vec::new();
        let mut replacements = Vec::new();

        for title in &headings.titles {
            let text = title.trim();
            if !text.is_empty() {
                matches.push(text.to_string());
                replacements.push(self.title(text));
            }
        }

        if include_subtitles {
            for subtitle in &headings.subtitles {
                let text = subtitle.trim();
                if !text.is_empty() {
                    matches.push(text.to_string());
                    replacements.push(self.subtitle(text));
                }
            }
        }

        (matches, replacements)
    }
}

impl Default for HeadingMarkup {
    fn default() -> Self {
        Self {
            title_prefix: "# ".to_string(),
            subtitle_prefix: "## ".to_string(),
            suffix: " <br>".to_string(),
        }
    }
}

/// Configuration for heading detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingConfig {
    /// Shortest trimmed length counted as a title
    pub min_size: usize,

    /// Longest trimmed length counted as a title
    pub max_size: usize,

    /// Text the classifier reads
    pub source: HeadingSource,

    /// Decoration applied during substitution
    pub markup: HeadingMarkup,

    /// Whether subtitles are decorated in the body
    pub decorate_subtitles: bool,
}

impl HeadingConfig {
    /// Create a configuration with the given title length range.
    pub fn new(min_size: usize, max_size: usize) -> Self {
        Self {
            min_size,
            max_size,
            ..Self::default()
        }
    }

    /// Set the heading source.
    pub fn with_source(mut self, source: HeadingSource) -> Self {
        self.source = source;
        self
    }

    /// Set the heading markup.
    pub fn with_markup(mut self, markup: HeadingMarkup) -> Self {
        self.markup = markup;
        self
    }

    /// Enable or disable subtitle decoration.
    pub fn with_subtitles(mut self, decorate: bool) -> Self {
        self.decorate_subtitles = decorate;
        self
    }

    /// Build the length heuristic for these thresholds.
    pub fn classifier(&self) -> Result<LengthHeuristic> {
        LengthHeuristic::new(self.min_size, self.max_size)
    }
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            min_size: 20,
            max_size: 25,
            source: HeadingSource::Body,
            markup: HeadingMarkup::default(),
            decorate_subtitles: false,
        }
    }
}
