//! Document model types for scanned page content.
//!
//! This module defines the intermediate representation that bridges
//! page analysis and rendering: the decoded page image, detected regions,
//! recognized text, classified headings, parsed tables, and the final
//! assembled document.

mod document;
mod heading;
mod page;
mod region;
mod table;
mod text;

pub use document::{Document, Metadata, TableSection};
pub use heading::{ClassifiedLine, HeadingLevel, Headings};
pub use page::Page;
pub use region::Region;
pub use table::{Table, TableRow};
pub use text::RecognizedText;
