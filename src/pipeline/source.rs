//! Per-page fragment sources.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::Fragment;

/// Produces the fragments of each page of a document.
///
/// Implementations wrap whatever decodes the document and lays out its text;
/// reconstruction only ever asks for one page at a time, in increasing order.
pub trait FragmentSource {
    /// Number of pages available.
    fn page_count(&self) -> usize;

    /// Fragments of the zero-based `page`, in any order.
    fn page_fragments(&mut self, page: usize) -> Result<Vec<Fragment>>;
}

/// In-memory pages of fragments.
///
/// Serializes as a JSON array of pages, each an array of fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PagedFragments {
    pages: Vec<Vec<Fragment>>,
}

impl PagedFragments {
    /// Wrap already extracted pages.
    pub fn new(pages: Vec<Vec<Fragment>>) -> Self {
        Self { pages }
    }

    /// Read pages from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let pages = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(pages)
    }

    /// Parse pages from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The wrapped pages.
    pub fn pages(&self) -> &[Vec<Fragment>] {
        &self.pages
    }
}

impl From<Vec<Vec<Fragment>>> for PagedFragments {
    fn from(pages: Vec<Vec<Fragment>>) -> Self {
        Self::new(pages)
    }
}

impl FragmentSource for PagedFragments {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_fragments(&mut self, page: usize) -> Result<Vec<Fragment>> {
        self.pages
            .get(page)
            .cloned()
            .ok_or(Error::PageOutOfRange {
                page,
                page_count: self.pages.len(),
            })
    }
}

impl FragmentSource for Vec<Vec<Fragment>> {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_fragments(&mut self, page: usize) -> Result<Vec<Fragment>> {
        let page_count = self.len();
        self.get(page)
            .cloned()
            .ok_or(Error::PageOutOfRange { page, page_count })
    }
}
