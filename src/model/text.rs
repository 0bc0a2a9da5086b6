//! Recognized text.

use serde::{Deserialize, Serialize};

/// Text returned by a recognizer for a page or region.
///
/// Lines are kept in the order the recognizer reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecognizedText(String);

impl RecognizedText {
    /// Wrap raw recognizer output.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Iterate over lines in reading order.
    ///
    /// Every `\n` starts a new line, so empty lines and a trailing empty
    /// line are reported. A trailing `\r` is stripped from each line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }

    /// Lines that contain something other than whitespace.
    pub fn non_blank_lines(&self) -> impl Iterator<Item = &str> {
        self.lines().filter(|line| !line.trim().is_empty())
    }

    /// Check if the text holds no visible characters.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for RecognizedText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for RecognizedText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_keep_empties() {
        let text = RecognizedText::from("a\n\nb\n");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["a", "", "b", ""]);
    }

    #[test]
    fn test_lines_strip_carriage_return() {
        let text = RecognizedText::from("a\r\nb");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_non_blank_lines() {
        let text = RecognizedText::from("  \nName Age\n\t\nAnn 30");
        let lines: Vec<_> = text.non_blank_lines().collect();
        assert_eq!(lines, vec!["Name Age", "Ann 30"]);
        assert!(!text.is_blank());
        assert!(RecognizedText::from(" \n ").is_blank());
    }
}
