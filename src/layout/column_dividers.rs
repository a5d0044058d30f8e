//! Column divider derivation.
//!
//! Column dividers are the left edges of the data columns. They are found by
//! a single greedy left-to-right pass over every data fragment's `x0`: a value
//! becomes a new divider only if it is further than the padding from every
//! divider accepted before it, otherwise it is absorbed by the divider that
//! already owns that neighbourhood.
//!
//! The pass is order dependent. A value is only compared against dividers
//! accepted earlier in the scan, so a pathological spread of edges can yield
//! a band that is wider than two paddings. Pages in one run can share a layout
//! (a template) to keep their columns aligned regardless.

use serde::{Deserialize, Serialize};

use crate::geometry::predecessor_band;
use crate::layout::row_clusterer::RowBucket;

/// Columns that precede the data columns: the location label and the row index.
pub const LEADING_COLUMNS: usize = 2;

/// Sorted column dividers shared by one or more pages.
///
/// Serializes as a bare JSON array of x-coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f32>", into = "Vec<f32>")]
pub struct ColumnLayout {
    dividers: Vec<f32>,
}

impl ColumnLayout {
    /// Create a layout from divider x-coordinates in any order.
    ///
    /// Non-finite values are discarded.
    pub fn new(mut dividers: Vec<f32>) -> Self {
        dividers.retain(|d| d.is_finite());
        dividers.sort_by(f32::total_cmp);
        Self { dividers }
    }

    /// Derive a layout from clustered rows.
    ///
    /// Every fragment except each row's index fragment contributes its `x0`.
    pub fn derive(rows: &[RowBucket], padding: f32) -> Self {
        let candidates = rows
            .iter()
            .flat_map(|row| row.cells.iter().map(|f| f.x0))
            .collect();
        Self {
            dividers: greedy_dividers(candidates, padding),
        }
    }

    /// Divider x-coordinates, ascending.
    pub fn dividers(&self) -> &[f32] {
        &self.dividers
    }

    /// Number of data columns.
    pub fn data_columns(&self) -> usize {
        self.dividers.len()
    }

    /// Total number of columns in a row, leading columns included.
    pub fn column_count(&self) -> usize {
        LEADING_COLUMNS + self.dividers.len()
    }

    /// Column a fragment with left edge `x0` belongs to.
    ///
    /// Returns `None` when the layout has no data columns at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf2table::layout::ColumnLayout;
    ///
    /// let layout = ColumnLayout::new(vec![120.0, 50.0]);
    /// assert_eq!(layout.column_for(50.0), Some(2));
    /// assert_eq!(layout.column_for(119.0), Some(2));
    /// assert_eq!(layout.column_for(900.0), Some(3));
    /// // Left of every divider clamps into the first data column
    /// assert_eq!(layout.column_for(10.0), Some(2));
    /// ```
    pub fn column_for(&self, x0: f32) -> Option<usize> {
        if self.dividers.is_empty() {
            return None;
        }
        Some(LEADING_COLUMNS + predecessor_band(&self.dividers, x0))
    }

    /// Adjacent dividers closer together than `padding`.
    ///
    /// A derived layout never has any; a supplied one may.
    pub fn narrow_gaps(&self, padding: f32) -> Vec<(f32, f32)> {
        self.dividers
            .windows(2)
            .filter(|pair| pair[1] - pair[0] <= padding)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }
}

impl From<Vec<f32>> for ColumnLayout {
    fn from(dividers: Vec<f32>) -> Self {
        Self::new(dividers)
    }
}

impl From<ColumnLayout> for Vec<f32> {
    fn from(layout: ColumnLayout) -> Self {
        layout.dividers
    }
}

/// Greedily cluster edge candidates into dividers.
///
/// Candidates are scanned in ascending order; each one is accepted only if its
/// distance to every previously accepted divider exceeds `padding`.
///
/// # Examples
///
/// ```
/// use pdf2table::layout::column_dividers::greedy_dividers;
///
/// let dividers = greedy_dividers(vec![130.0, 50.0, 52.0, 79.0, 81.0], 30.0);
/// assert_eq!(dividers, vec![50.0, 81.0, 130.0]);
/// ```
pub fn greedy_dividers(mut candidates: Vec<f32>, padding: f32) -> Vec<f32> {
    candidates.retain(|x| x.is_finite());
    candidates.sort_by(f32::total_cmp);

    let mut accepted: Vec<f32> = Vec::new();
    for x in candidates {
        if accepted.iter().all(|d| (x - d).abs() > padding) {
            accepted.push(x);
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fragment::Fragment;

    fn row(index_x: f32, cells: &[f32]) -> RowBucket {
        RowBucket {
            divider: 100.0,
            index: Some(Fragment::new(index_x, 95.0, index_x + 10.0, 103.0, "1")),
            cells: cells
                .iter()
                .map(|&x| Fragment::new(x, 95.0, x + 20.0, 103.0, "v"))
                .collect(),
        }
    }

    #[test]
    fn test_greedy_absorbs_neighbours() {
        assert_eq!(greedy_dividers(vec![50.0, 60.0, 80.0], 30.0), vec![50.0]);
        assert_eq!(greedy_dividers(vec![50.0, 80.01], 30.0), vec![50.0, 80.01]);
    }

    #[test]
    fn test_greedy_padding_is_exclusive() {
        assert_eq!(greedy_dividers(vec![50.0, 80.0], 30.0), vec![50.0]);
    }

    #[test]
    fn test_greedy_is_order_dependent() {
        // 75 is absorbed by 50, so 100 survives even though it sits 25 from 75
        assert_eq!(greedy_dividers(vec![100.0, 75.0, 50.0], 30.0), vec![50.0, 100.0]);
    }

    #[test]
    fn test_greedy_empty_and_non_finite() {
        assert!(greedy_dividers(vec![], 30.0).is_empty());
        assert_eq!(greedy_dividers(vec![f32::NAN, 40.0], 30.0), vec![40.0]);
    }

    #[test]
    fn test_derive_skips_index_fragments() {
        let rows = vec![row(5.0, &[50.0, 200.0]), row(5.0, &[52.0, 198.0, 320.0])];
        let layout = ColumnLayout::derive(&rows, 30.0);
        assert_eq!(layout.dividers(), &[50.0, 198.0, 320.0]);
        assert_eq!(layout.column_count(), 5);
        assert_eq!(layout.data_columns(), 3);
    }

    #[test]
    fn test_column_for_without_dividers() {
        assert_eq!(ColumnLayout::default().column_for(50.0), None);
        assert_eq!(ColumnLayout::default().column_count(), LEADING_COLUMNS);
    }

    #[test]
    fn test_narrow_gaps() {
        let layout = ColumnLayout::new(vec![50.0, 70.0, 200.0]);
        assert_eq!(layout.narrow_gaps(30.0), vec![(50.0, 70.0)]);
        assert!(layout.narrow_gaps(10.0).is_empty());
    }

    #[test]
    fn test_json_roundtrip_sorts() {
        let layout: ColumnLayout = serde_json::from_str("[200.0, 50.0]").unwrap();
        assert_eq!(layout.dividers(), &[50.0, 200.0]);
        assert_eq!(serde_json::to_string(&layout).unwrap(), "[50.0,200.0]");
    }
}
