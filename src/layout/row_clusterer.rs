//! Row clustering anchored on the index column.
//!
//! Tables carry a narrow line-number column on their left edge. Each fragment
//! in that column anchors one row: its baseline plus a small slack becomes the
//! row's upper divider, and every other fragment joins the row whose divider
//! is the lowest one still at or above it.

use crate::config::ReconstructionConfig;
use crate::geometry::successor_band;
use crate::layout::fragment::Fragment;

/// The fragments that make up one table row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBucket {
    /// Upper boundary of the row
    pub divider: f32,
    /// The row's index fragment, if one landed in this row
    pub index: Option<Fragment>,
    /// Remaining fragments, left to right (higher first on ties)
    pub cells: Vec<Fragment>,
}

impl RowBucket {
    /// Trimmed index text, or an empty string for a row without an index.
    pub fn index_text(&self) -> &str {
        self.index.as_ref().map(Fragment::trimmed).unwrap_or("")
    }
}

/// Rows recovered from a page's table section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowClusters {
    /// Rows from the top of the page down
    pub rows: Vec<RowBucket>,
    /// Number of index fragments seen
    pub index_fragments: usize,
    /// Fragments above every divider, clamped into the first row
    pub above_first_row: usize,
    /// Fragments dropped because they were a page without rows
    pub discarded: usize,
}

/// Whether a fragment sits in the index column.
pub fn is_index_fragment(fragment: &Fragment, config: &ReconstructionConfig) -> bool {
    fragment.x1 < config.index_column_width
}

/// Compute row dividers from the index fragments, top of page first.
///
/// # Examples
///
/// ```
/// use pdf2table::ReconstructionConfig;
/// use pdf2table::layout::{Fragment, row_clusterer::row_dividers};
///
/// let fragments = vec![
///     Fragment::new(5.0, 80.0, 20.0, 90.0, "2"),
///     Fragment::new(5.0, 100.0, 20.0, 110.0, "1"),
///     Fragment::new(50.0, 100.0, 90.0, 110.0, "Alpha"),
/// ];
/// let dividers = row_dividers(&fragments, &ReconstructionConfig::default());
/// assert_eq!(dividers, vec![105.0, 85.0]);
/// ```
pub fn row_dividers(fragments: &[Fragment], config: &ReconstructionConfig) -> Vec<f32> {
    let mut dividers: Vec<f32> = fragments
        .iter()
        .filter(|f| is_index_fragment(f, config))
        .map(|f| f.y0 + config.row_divider_slack)
        .collect();
    dividers.sort_by(|a, b| b.total_cmp(a));
    dividers
}

/// Assign table fragments to rows.
///
/// Blank fragments are dropped first. A fragment whose `y0` lies above every
/// divider is clamped into the first row; one below every divider lands in the
/// last row. A page without index fragments yields no rows, and all of its
/// content is counted as discarded.
pub fn cluster_rows(fragments: Vec<Fragment>, config: &ReconstructionConfig) -> RowClusters {
    let fragments: Vec<Fragment> = fragments.into_iter().filter(|f| !f.is_blank()).collect();
    let dividers = row_dividers(&fragments, config);

    if dividers.is_empty() {
        log::debug!("No index fragments: discarding {} table fragments", fragments.len());
        return RowClusters {
            discarded: fragments.len(),
            ..Default::default()
        };
    }

    let mut buckets: Vec<Vec<Fragment>> = vec![Vec::new(); dividers.len()];
    let mut above_first_row = 0;
    for fragment in fragments {
        let row = match successor_band(&dividers, fragment.y0) {
            Some(row) => row,
            None => {
                above_first_row += 1;
                0
            },
        };
        buckets[row].push(fragment);
    }

    let rows: Vec<RowBucket> = dividers
        .iter()
        .zip(buckets)
        .map(|(&divider, mut cells)| {
            cells.sort_by(Fragment::cmp_row_order);
            let index = cells
                .iter()
                .position(|f| is_index_fragment(f, config))
                .map(|pos| cells.remove(pos));
            RowBucket {
                divider,
                index,
                cells,
            }
        })
        .collect();

    log::debug!(
        "Clustered {} rows ({} fragments above the first row)",
        rows.len(),
        above_first_row
    );

    RowClusters {
        index_fragments: dividers.len(),
        rows,
        above_first_row,
        discarded: 0,
    }
}
