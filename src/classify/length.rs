//! Line-length heading heuristic.

use crate::error::{Error, Result};
use crate::model::HeadingLevel;

use super::LineClassifier;

/// Classifies lines by trimmed character count.
///
/// - count in `[min_size, max_size]` -> Title
/// - count `< min_size` -> Subtitle
/// - count `> max_size` -> Body
///
/// Whitespace-only lines count 0 and are Subtitles unless `min_size == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthHeuristic {
    min_size: usize,
    max_size: usize,
}

impl LengthHeuristic {
    /// Create the heuristic. Fails when `min_size > max_size`.
    pub fn new(min_size: usize, max_size: usize) -> Result<Self> {
        if min_size > max_size {
            return Err(Error::InvalidConfig(format!(
                "heading min size {} exceeds max size {}",
                min_size, max_size
            )));
        }
        Ok(Self { min_size, max_size })
    }

    /// Lower bound of the title range.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Upper bound of the title range.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl LineClassifier for LengthHeuristic {
    fn classify(&self, line: &str) -> HeadingLevel {
        let size = line.trim().chars().count();
        if (self.min_size..=self.max_size).contains(&size) {
            HeadingLevel::Title
        } else if size < self.min_size {
            HeadingLevel::Subtitle
        } else {
            HeadingLevel::Body
        }
    }
}
