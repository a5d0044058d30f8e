//! Multi-page table reconstruction.
//!
//! Pages are processed one at a time in increasing order. When a template page
//! is given, its column layout is derived first and then reused, unchanged,
//! for every page of the run, so all pages produce rows of the same width and
//! can be concatenated into one table.

use crate::config::{PageErrorPolicy, ReconstructionConfig};
use crate::error::{Error, Result};
use crate::layout::{ColumnLayout, Fragment, Table};
use crate::pipeline::source::FragmentSource;
use crate::pipeline::stages::{AssembleTable, PageTable, RawPage};

/// A half-open range of zero-based pages, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// First page processed
    pub start: usize,
    /// One past the last page processed
    pub end: usize,
}

impl PageRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range holding a single page.
    pub fn single(page: usize) -> Self {
        Self {
            start: page,
            end: page + 1,
        }
    }

    /// Every page of a source.
    pub fn all(page_count: usize) -> Self {
        Self {
            start: 0,
            end: page_count,
        }
    }

    /// Number of pages in the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range holds no pages.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn check(&self, page_count: usize) -> Result<()> {
        if self.start > self.end {
            return Err(Error::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        if self.end > page_count {
            return Err(Error::PageOutOfRange {
                page: self.end - 1,
                page_count,
            });
        }
        Ok(())
    }
}

/// A page left out of a run under [`PageErrorPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPage {
    /// Zero-based page index
    pub page: usize,
    /// Why the page failed
    pub reason: String,
}

/// Result of reconstructing a range of pages.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    /// Layout shared by every page, if the run used a template
    pub layout: Option<ColumnLayout>,
    /// Zero-based page index and table of each page that succeeded
    pub pages: Vec<(usize, PageTable)>,
    /// Pages that failed and were skipped
    pub skipped: Vec<SkippedPage>,
}

impl RunOutput {
    /// Concatenate every page's rows into one table, in page order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RaggedRow`] if pages were aligned to layouts with
    /// different column counts, which can only happen without a template.
    pub fn combined(&self) -> Result<Table> {
        let mut combined = Table::default();
        for (page, page_table) in &self.pages {
            combined
                .append(page_table.table.clone())
                .map_err(|e| e.on_page(*page))?;
        }
        Ok(combined)
    }

    /// Total number of rows across all pages.
    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|(_, p)| p.table.len()).sum()
    }
}

/// Rebuilds tables from positioned text fragments.
///
/// # Examples
///
/// ```
/// use pdf2table::{Fragment, TableReconstructor};
///
/// let fragments = vec![
///     Fragment::new(0.0, 700.0, 60.0, 708.0, "*****"),
///     Fragment::new(0.0, 600.0, 60.0, 608.0, "*****"),
///     Fragment::new(10.0, 550.0, 80.0, 558.0, "Site A"),
///     Fragment::new(0.0, 500.0, 60.0, 508.0, "*****"),
///     Fragment::new(5.0, 100.0, 20.0, 108.0, "1"),
///     Fragment::new(50.0, 100.0, 90.0, 108.0, "Alpha"),
///     Fragment::new(280.0, 10.0, 300.0, 18.0, "- 1 -"),
/// ];
///
/// let reconstructor = TableReconstructor::default();
/// let page = reconstructor.reconstruct_page(fragments, None).unwrap();
/// assert_eq!(page.table.rows()[0], vec!["Site A", "1", "Alpha"]);
/// assert_eq!(page.layout.dividers(), &[50.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableReconstructor {
    config: ReconstructionConfig,
}

impl TableReconstructor {
    /// Create a reconstructor with a validated configuration.
    pub fn new(config: ReconstructionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReconstructionConfig {
        &self.config
    }

    /// Reconstruct one page.
    ///
    /// With a `template`, the page is aligned to it unmodified; otherwise the
    /// page derives its own column layout, returned in [`PageTable::layout`].
    pub fn reconstruct_page(
        &self,
        fragments: Vec<Fragment>,
        template: Option<&ColumnLayout>,
    ) -> Result<PageTable> {
        RawPage::new(fragments)
            .segment(&self.config)?
            .cluster(&self.config)
            .align(&self.config, template)
            .assemble(&self.config)
    }

    /// Derive the column layout of a template page.
    ///
    /// Template failures always abort, whatever the page error policy.
    pub fn derive_template<S>(&self, source: &mut S, page: usize) -> Result<ColumnLayout>
    where
        S: FragmentSource + ?Sized,
    {
        let page_count = source.page_count();
        if page >= page_count {
            return Err(Error::PageOutOfRange { page, page_count });
        }

        let fragments = source.page_fragments(page).map_err(|e| e.on_page(page))?;
        let table = self
            .reconstruct_page(fragments, None)
            .map_err(|e| e.on_page(page))?;

        log::info!(
            "Template page {} yields {} data columns",
            page,
            table.layout.data_columns()
        );
        Ok(table.layout)
    }

    /// Reconstruct a range of pages.
    ///
    /// When `template_page` is given, its layout is derived first and threaded
    /// through every page of `range`. Otherwise each page derives its own.
    pub fn run<S>(
        &self,
        source: &mut S,
        template_page: Option<usize>,
        range: PageRange,
    ) -> Result<RunOutput>
    where
        S: FragmentSource + ?Sized,
    {
        let layout = match template_page {
            Some(page) => Some(self.derive_template(source, page)?),
            None => None,
        };
        self.run_pages(source, layout, range)
    }

    /// Reconstruct a range of pages against an imported layout.
    pub fn run_with_layout<S>(
        &self,
        source: &mut S,
        layout: ColumnLayout,
        range: PageRange,
    ) -> Result<RunOutput>
    where
        S: FragmentSource + ?Sized,
    {
        self.run_pages(source, Some(layout), range)
    }

    fn run_pages<S>(
        &self,
        source: &mut S,
        layout: Option<ColumnLayout>,
        range: PageRange,
    ) -> Result<RunOutput>
    where
        S: FragmentSource + ?Sized,
    {
        range.check(source.page_count())?;

        let mut output = RunOutput {
            layout,
            ..Default::default()
        };

        for page in range.start..range.end {
            let result = source
                .page_fragments(page)
                .and_then(|fragments| self.reconstruct_page(fragments, output.layout.as_ref()));

            match result {
                Ok(table) => {
                    log::debug!("Page {}: {} rows", page, table.table.len());
                    output.pages.push((page, table));
                },
                Err(e) => match self.config.on_page_error {
                    PageErrorPolicy::Abort => return Err(e.on_page(page)),
                    PageErrorPolicy::Skip => {
                        log::warn!("Skipping page {}: {}", page, e);
                        output.skipped.push(SkippedPage {
                            page,
                            reason: e.to_string(),
                        });
                    },
                },
            }
        }

        log::info!(
            "Reconstructed {} of {} pages ({} rows, {} skipped)",
            output.pages.len(),
            range.len(),
            output.row_count(),
            output.skipped.len()
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_range() {
        assert!(PageRange::new(3, 2).is_err());
        let range = PageRange::new(2, 5).unwrap();
        assert_eq!(range.len(), 3);
        assert!(!range.is_empty());
        assert_eq!(PageRange::single(4), PageRange { start: 4, end: 5 });
        assert!(PageRange::all(0).is_empty());
    }

    #[test]
    fn test_range_check() {
        assert!(PageRange::all(3).check(3).is_ok());
        assert!(matches!(
            PageRange::new(0, 4).unwrap().check(3),
            Err(Error::PageOutOfRange {
                page: 3,
                page_count: 3
            })
        ));
        assert!(PageRange::all(0).check(0).is_ok());
    }

    #[test]
    fn test_new_validates_config() {
        let bad = ReconstructionConfig::default().with_boundary_marker("");
        assert!(TableReconstructor::new(bad).is_err());
        assert!(TableReconstructor::new(ReconstructionConfig::default()).is_ok());
    }

    #[test]
    fn test_template_page_out_of_range() {
        let reconstructor = TableReconstructor::default();
        let mut source: Vec<Vec<Fragment>> = vec![];
        assert!(matches!(
            reconstructor.run(&mut source, Some(0), PageRange::all(0)),
            Err(Error::PageOutOfRange { page: 0, .. })
        ));
    }

    #[test]
    fn test_empty_run() {
        let reconstructor = TableReconstructor::default();
        let mut source: Vec<Vec<Fragment>> = vec![vec![]];
        let output = reconstructor.run(&mut source, None, PageRange::new(0, 0).unwrap()).unwrap();
        assert!(output.pages.is_empty());
        assert!(output.combined().unwrap().is_empty());
    }
}
