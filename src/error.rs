//! Error types for table reconstruction.
//!
//! Every structural violation a page can exhibit has its own variant so callers
//! can decide whether to abort a run or skip the offending page.

use crate::layout::segmenter::Section;

/// Result type alias for table reconstruction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing a table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page produced no fragments, so there is no page number to strip
    #[error("Page has no fragments: expected a trailing page number")]
    MissingPageNumber,

    /// The geometrically last fragment is not of the form `- N -`
    #[error("Malformed page number: expected '- N -', found '{0}'")]
    MalformedPageNumber(String),

    /// A content fragment appeared before any boundary opened a section
    #[error("Fragment '{text}' appears before the first section boundary")]
    ContentBeforeBoundary {
        /// Text of the offending fragment
        text: String,
    },

    /// More boundary fragments than there are sections
    #[error("Too many section boundaries: expected {expected}")]
    TooManyBoundaries {
        /// Number of sections a page defines
        expected: usize,
    },

    /// Fewer boundary fragments than there are sections
    #[error("Section {section} was never opened by a boundary")]
    MissingSection {
        /// First section that has no boundary
        section: Section,
    },

    /// The LOCATION section must hold exactly one fragment
    #[error("Section {} must hold exactly one fragment, found {found}", Section::Location)]
    LocationCount {
        /// Number of fragments found in the section
        found: usize,
    },

    /// A fragment could not be mapped into any data column
    #[error("Fragment '{text}' in row {row} has no data column to land in")]
    UnplacedFragment {
        /// Zero-based row index
        row: usize,
        /// Text of the offending fragment
        text: String,
    },

    /// A row does not have the width of the table it belongs to
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index within the table
        row: usize,
        /// Number of cells in the row
        found: usize,
        /// Width of the table
        expected: usize,
    },

    /// A page failed to reconstruct
    #[error("Page {page}: {source}")]
    Page {
        /// Zero-based page index
        page: usize,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// A requested page does not exist in the source
    #[error("Page {page} out of range (page count: {page_count})")]
    PageOutOfRange {
        /// Zero-based page index requested
        page: usize,
        /// Number of pages the source holds
        page_count: usize,
    },

    /// A page range whose start lies after its end
    #[error("Invalid page range: start {start} is after end {end}")]
    InvalidRange {
        /// Inclusive start page
        start: usize,
        /// Exclusive end page
        end: usize,
    },

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The fragment source failed to produce a page
    #[error("Fragment source error: {0}")]
    Source(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Attach the zero-based page index to an error raised while processing it.
    pub fn on_page(self, page: usize) -> Self {
        match self {
            err @ Error::Page { .. } => err,
            other => Error::Page {
                page,
                source: Box::new(other),
            },
        }
    }

    /// The page index carried by this error, if any.
    pub fn page(&self) -> Option<usize> {
        match self {
            Error::Page { page, .. } => Some(*page),
            _ => None,
        }
    }
}
