//! Page reconstruction stages.
//!
//! A page moves through owned stage values, each produced from the previous
//! one without mutating it in place:
//!
//! ```text
//! RawPage ─segment→ SegmentedPage ─cluster→ ClusteredPage ─align→ AlignedPage ─assemble→ PageTable
//! ```
//!
//! Assembling an already assembled [`PageTable`] is a no-op, so callers can
//! hold either stage behind [`AssembleTable`] without re-clustering.

use crate::config::ReconstructionConfig;
use crate::error::Result;
use crate::layout::{
    ColumnLayout, Fragment, RowBucket, SegmentedPage, Table, assemble_table, cluster_rows,
    segment_page,
};
use crate::pipeline::warnings::ReconstructionWarning;

/// Unprocessed fragments of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPage {
    /// Fragments in no particular order
    pub fragments: Vec<Fragment>,
}

impl RawPage {
    /// Wrap a page's fragments.
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }

    /// Split the page into sections.
    pub fn segment(self, config: &ReconstructionConfig) -> Result<SegmentedPage> {
        segment_page(self.fragments, config)
    }
}

impl SegmentedPage {
    /// Cluster the table section into rows.
    pub fn cluster(self, config: &ReconstructionConfig) -> ClusteredPage {
        let had_content = self.table.iter().any(|f| !f.is_blank());
        let clusters = cluster_rows(self.table, config);

        let mut warnings = Vec::new();
        if !had_content {
            warnings.push(ReconstructionWarning::EmptyTable);
        } else if clusters.index_fragments == 0 {
            warnings.push(ReconstructionWarning::NoIndexFragments {
                discarded: clusters.discarded,
            });
        }
        if clusters.above_first_row > 0 {
            warnings.push(ReconstructionWarning::FragmentsAboveFirstRow {
                count: clusters.above_first_row,
            });
        }
        warnings.extend(
            clusters
                .rows
                .iter()
                .enumerate()
                .filter(|(_, row)| row.index.is_none())
                .map(|(row, _)| ReconstructionWarning::RowWithoutIndex { row }),
        );

        ClusteredPage {
            page_number: self.page_number,
            headers: self.headers.iter().map(|f| f.trimmed().to_string()).collect(),
            location: self.location.trimmed().to_string(),
            rows: clusters.rows,
            warnings,
        }
    }
}

/// A page whose table fragments are grouped into rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteredPage {
    /// Number printed at the bottom of the page
    pub page_number: u32,
    /// Trimmed heading texts
    pub headers: Vec<String>,
    /// Trimmed location label
    pub location: String,
    /// Rows, top to bottom
    pub rows: Vec<RowBucket>,
    /// Conditions found so far
    pub warnings: Vec<ReconstructionWarning>,
}

impl ClusteredPage {
    /// Fix the page's columns, either from a template or from its own rows.
    ///
    /// A supplied template is used unmodified.
    pub fn align(self, config: &ReconstructionConfig, template: Option<&ColumnLayout>) -> AlignedPage {
        let mut warnings = self.warnings;
        let layout = match template {
            Some(layout) => {
                warnings.extend(
                    layout
                        .narrow_gaps(config.column_padding)
                        .into_iter()
                        .map(|(left, right)| ReconstructionWarning::NarrowColumnGap { left, right }),
                );
                layout.clone()
            },
            None => ColumnLayout::derive(&self.rows, config.column_padding),
        };

        log::debug!(
            "Page {}: {} rows aligned to {} data columns ({})",
            self.page_number,
            self.rows.len(),
            layout.data_columns(),
            if template.is_some() { "template" } else { "derived" }
        );

        AlignedPage {
            page_number: self.page_number,
            headers: self.headers,
            location: self.location,
            rows: self.rows,
            layout,
            warnings,
        }
    }
}

/// A page with rows and a fixed column layout.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPage {
    /// Number printed at the bottom of the page
    pub page_number: u32,
    /// Trimmed heading texts
    pub headers: Vec<String>,
    /// Trimmed location label
    pub location: String,
    /// Rows, top to bottom
    pub rows: Vec<RowBucket>,
    /// Column dividers the rows are aligned to
    pub layout: ColumnLayout,
    /// Conditions found so far
    pub warnings: Vec<ReconstructionWarning>,
}

/// The finished table of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTable {
    /// Number printed at the bottom of the page
    pub page_number: u32,
    /// Trimmed heading texts
    pub headers: Vec<String>,
    /// Trimmed location label, repeated in column 0 of every row
    pub location: String,
    /// Rows of `2 + layout.data_columns()` cells
    pub table: Table,
    /// Column dividers, reusable as a template for later pages
    pub layout: ColumnLayout,
    /// Non-fatal conditions met while reconstructing the page
    pub warnings: Vec<ReconstructionWarning>,
}

impl PageTable {
    /// Split into location label, table and column layout.
    pub fn into_parts(self) -> (String, Table, ColumnLayout) {
        (self.location, self.table, self.layout)
    }
}

/// The final stage transition.
pub trait AssembleTable {
    /// Produce the page's table.
    fn assemble(self, config: &ReconstructionConfig) -> Result<PageTable>;
}

impl AssembleTable for AlignedPage {
    fn assemble(self, config: &ReconstructionConfig) -> Result<PageTable> {
        let table = assemble_table(&self.location, &self.rows, &self.layout, &config.cell_separator)?;

        for warning in &self.warnings {
            log::warn!("Page {}: {}", self.page_number, warning);
        }

        Ok(PageTable {
            page_number: self.page_number,
            headers: self.headers,
            location: self.location,
            table,
            layout: self.layout,
            warnings: self.warnings,
        })
    }
}

impl AssembleTable for PageTable {
    fn assemble(self, _config: &ReconstructionConfig) -> Result<PageTable> {
        Ok(self)
    }
}
