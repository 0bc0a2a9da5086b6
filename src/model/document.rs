//! Document-level types.

use super::{Headings, Region, Table};
use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A converted page: substituted body text plus at most one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Conversion metadata
    pub metadata: Metadata,

    /// Body text with heading lines decorated
    pub body: String,

    /// Heading classification the body substitution was built from
    pub headings: Headings,

    /// Outcome of table extraction
    pub table: TableSection,
}

impl Document {
    /// Create a document from its parts.
    pub fn new(metadata: Metadata, body: String, headings: Headings, table: TableSection) -> Self {
        Self {
            metadata,
            body,
            headings,
            table,
        }
    }

    /// The extracted table, if one was parsed.
    pub fn table(&self) -> Option<&Table> {
        match &self.table {
            TableSection::Found { table, .. } => Some(table),
            _ => None,
        }
    }

    /// Condition that kept a table out of the document, if any.
    pub fn table_issue(&self) -> Option<Error> {
        self.table.issue()
    }

    /// Get plain text content (body, then table cells tab-separated).
    pub fn plain_text(&self) -> String {
        match self.table() {
            Some(table) if !self.body.is_empty() => {
                format!("{}\n\n{}", self.body.trim_end(), table.plain_text())
            }
            Some(table) => table.plain_text(),
            None => self.body.clone(),
        }
    }
}

/// Outcome of the table stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableSection {
    /// A table was parsed from `region`.
    Found {
        /// Region the table text was recognized from
        region: Region,
        /// Parsed cell grid
        table: Table,
    },
    /// No region matched the table predicate.
    NotFound,
    /// Candidate regions existed but none yielded a row.
    Empty {
        /// First candidate region
        region: Region,
    },
    /// Recognition failed for the table region and was tolerated.
    Failed {
        /// Region whose recognition failed
        region: Region,
        /// Failure description
        message: String,
    },
}

impl TableSection {
    /// Check if a table was parsed.
    pub fn is_found(&self) -> bool {
        matches!(self, TableSection::Found { .. })
    }

    /// Error describing why no table is present, if any.
    pub fn issue(&self) -> Option<Error> {
        match self {
            TableSection::Found { .. } => None,
            TableSection::NotFound => Some(Error::NoTableFound),
            TableSection::Empty { region } => Some(Error::MalformedTable(*region)),
            TableSection::Failed { message, .. } => Some(Error::Other(message.clone())),
        }
    }
}

/// Conversion metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Source file name or label
    pub source: Option<String>,

    /// Page width in pixels
    pub width: u32,

    /// Page height in pixels
    pub height: u32,

    /// Number of regions blanked before body recognition
    pub suppressed_regions: usize,

    /// Candidate table regions in detection order
    pub table_regions: Vec<Region>,

    /// Conversion time
    pub converted: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata for a page of the given size.
    pub fn for_page(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            converted: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref source) = self.source {
            lines.push(format!("source: \"{}\"", escape_yaml(source)));
        }
        lines.push(format!("width: {}", self.width));
        lines.push(format!("height: {}", self.height));
        lines.push(format!("table_regions: {}", self.table_regions.len()));
        if let Some(ref converted) = self.converted {
            lines.push(format!("converted: {}", converted.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
