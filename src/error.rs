//! Error types for unscan library.

use std::fmt;
use std::io;
use std::time::Duration;
use thiserror::Error;

use crate::model::Region;

/// Result type alias for unscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a recognized image format.
    #[error("Unknown file format: not a supported image")]
    UnknownFormat,

    /// The image could not be decoded.
    #[error("Image decoding error: {0}")]
    Decode(String),

    /// The text recognizer failed for one pipeline stage.
    #[error("Recognition failed during {stage} stage: {source}")]
    Recognition {
        /// Stage that invoked the recognizer
        stage: Stage,
        /// Underlying recognizer failure
        #[source]
        source: RecognizeError,
    },

    /// No region on the page matched the table predicate.
    #[error("No table region found on page")]
    NoTableFound,

    /// A table region was found but produced no rows.
    #[error("Table region at {0} produced no rows")]
    MalformedTable(Region),

    /// A region does not fit inside the page it was applied to.
    #[error("Region {region} lies outside the {page_width}x{page_height} page")]
    InvalidRegion {
        /// Offending region
        region: Region,
        /// Page width in pixels
        page_width: u32,
        /// Page height in pixels
        page_height: u32,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap a recognizer failure with the stage that triggered it.
    pub fn recognition(stage: Stage, source: RecognizeError) -> Self {
        Error::Recognition { stage, source }
    }

    /// Whether this error came from a recognizer timing out.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Recognition {
                source: RecognizeError::TimedOut(_),
                ..
            }
        )
    }

    /// Whether this error is caused by bad input rather than an unavailable collaborator.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::UnknownFormat | Error::Decode(_))
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            image::ImageError::Unsupported(_) => Error::UnknownFormat,
            _ => Error::Decode(err.to_string()),
        }
    }
}

/// Failure reported by a [`TextRecognizer`](crate::recognize::TextRecognizer).
#[derive(Error, Debug)]
pub enum RecognizeError {
    /// The recognizer ran but reported a failure.
    #[error("{0}")]
    Failed(String),

    /// The recognizer did not answer within the configured timeout.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    /// The recognizer could not be started or talked to.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Pipeline stage that invoked a recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Body text of the suppressed page
    Body,
    /// Full-page recognition used for heading classification
    Headings,
    /// Text inside a table region
    Table,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Body => f.write_str("body"),
            Stage::Headings => f.write_str("headings"),
            Stage::Table => f.write_str("table"),
        }
    }
}
