//! Page segmentation into headers, location and table.
//!
//! A page is laid out as a run of sections, each opened by a boundary fragment
//! (a line of asterisks). The page ends with a centred page number of the form
//! `- N -`, which is validated and dropped before the sections are split.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::ReconstructionConfig;
use crate::error::{Error, Result};
use crate::layout::fragment::Fragment;

lazy_static! {
    /// "- 3 -" style page numbers
    static ref RE_PAGE_NUMBER: Regex = Regex::new(r"^\s*-\s*(\d+)\s*-\s*$").unwrap();
}

/// A page section, in the order sections appear on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Report headings above the location label
    Headers,
    /// The single label naming where the table's data comes from
    Location,
    /// The data table itself
    Table,
}

impl Section {
    /// All sections in page order.
    pub const ALL: [Section; 3] = [Section::Headers, Section::Location, Section::Table];

    /// Upper-case section name.
    pub fn name(&self) -> &'static str {
        match self {
            Section::Headers => "HEADERS",
            Section::Location => "LOCATION",
            Section::Table => "TABLE",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A page split into its sections.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedPage {
    /// Number printed at the bottom of the page
    pub page_number: u32,
    /// Heading fragments, in page order
    pub headers: Vec<Fragment>,
    /// The location label
    pub location: Fragment,
    /// Table fragments, in page order
    pub table: Vec<Fragment>,
}

/// Parse a `- N -` page number.
///
/// # Errors
///
/// Returns [`Error::MalformedPageNumber`] if the text does not match.
///
/// # Examples
///
/// ```
/// use pdf2table::layout::segmenter::parse_page_number;
///
/// assert_eq!(parse_page_number(" - 12 -\n").unwrap(), 12);
/// assert!(parse_page_number("Page 12").is_err());
/// ```
pub fn parse_page_number(text: &str) -> Result<u32> {
    RE_PAGE_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .ok_or_else(|| Error::MalformedPageNumber(text.trim().to_string()))
}

/// Split a page's fragments into its sections.
///
/// Fragments are put in page order (top to bottom, then left to right), the
/// trailing page number is validated and removed, and every boundary fragment
/// opens the next section. Boundary fragments themselves are discarded.
///
/// # Errors
///
/// Fails if the page number is missing or malformed, if content appears before
/// the first boundary, if the number of boundaries differs from the number of
/// sections, or if the location section does not hold exactly one fragment.
pub fn segment_page(mut fragments: Vec<Fragment>, config: &ReconstructionConfig) -> Result<SegmentedPage> {
    fragments.sort_by(Fragment::cmp_page_order);

    let last = fragments.pop().ok_or(Error::MissingPageNumber)?;
    let page_number = parse_page_number(&last.text)?;

    let mut sections: Vec<Vec<Fragment>> = Vec::with_capacity(Section::ALL.len());
    for fragment in fragments {
        if fragment.is_boundary(&config.boundary_marker) {
            if sections.len() == Section::ALL.len() {
                return Err(Error::TooManyBoundaries {
                    expected: Section::ALL.len(),
                });
            }
            sections.push(Vec::new());
            continue;
        }

        match sections.last_mut() {
            Some(open) => open.push(fragment),
            None => {
                return Err(Error::ContentBeforeBoundary {
                    text: fragment.text,
                })
            },
        }
    }

    if let Some(&section) = Section::ALL.get(sections.len()) {
        return Err(Error::MissingSection { section });
    }

    let mut sections = sections.into_iter();
    let headers = sections.next().unwrap_or_default();
    let mut location = sections.next().unwrap_or_default();
    let table = sections.next().unwrap_or_default();

    if location.len() != 1 {
        return Err(Error::LocationCount {
            found: location.len(),
        });
    }
    let location = location.remove(0);

    log::debug!(
        "Segmented page {}: {} header, {} table fragments, location '{}'",
        page_number,
        headers.len(),
        table.len(),
        location.trimmed()
    );

    Ok(SegmentedPage {
        page_number,
        headers,
        location,
        table,
    })
}
