//! Heading classification results.

use serde::{Deserialize, Serialize};

/// Coarse visual level of a text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    /// Top-level heading
    Title,
    /// Secondary heading
    Subtitle,
    /// Unclassified body text, left as-is
    Body,
}

/// A line paired with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    /// Line text as recognized (untrimmed)
    pub text: String,
    /// Assigned level
    pub level: HeadingLevel,
}

impl ClassifiedLine {
    /// Create a classified line.
    pub fn new(text: impl Into<String>, level: HeadingLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

/// Lines partitioned by heading level, each bucket in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    /// Lines classified as titles
    pub titles: Vec<String>,
    /// Lines classified as subtitles
    pub subtitles: Vec<String>,
    /// Lines left unclassified
    pub body: Vec<String>,
}

impl Headings {
    /// Create an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// File a classified line into its bucket.
    pub fn push(&mut self, line: ClassifiedLine) {
        match line.level {
            HeadingLevel::Title => self.titles.push(line.text),
            HeadingLevel::Subtitle => self.subtitles.push(line.text),
            HeadingLevel::Body => self.body.push(line.text),
        }
    }

    /// Total number of classified lines across all buckets.
    pub fn len(&self) -> usize {
        self.titles.len() + self.subtitles.len() + self.body.len()
    }

    /// Check if no line was classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<ClassifiedLine> for Headings {
    fn from_iter<I: IntoIterator<Item = ClassifiedLine>>(iter: I) -> Self {
        let mut headings = Headings::new();
        for line in iter {
            headings.push(line);
        }
        headings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_files_by_level() {
        let headings: Headings = [
            ClassifiedLine::new("Intro", HeadingLevel::Title),
            ClassifiedLine::new("a", HeadingLevel::Subtitle),
            ClassifiedLine::new("long body line", HeadingLevel::Body),
            ClassifiedLine::new("Outro", HeadingLevel::Title),
        ]
        .into_iter()
        .collect();

        assert_eq!(headings.titles, vec!["Intro", "Outro"]);
        assert_eq!(headings.subtitles, vec!["a"]);
        assert_eq!(headings.body, vec!["long body line"]);
        assert_eq!(headings.len(), 4);
    }
}
