//! Cell assembly.
//!
//! Every row starts with the page's location label and the row's index text,
//! followed by one cell per data column. Fragments that land in the same cell
//! are joined with the configured separator in row order, so a value wrapped
//! over several lines keeps every line.

use crate::error::{Error, Result};
use crate::layout::column_dividers::ColumnLayout;
use crate::layout::row_clusterer::RowBucket;
use crate::layout::table::Table;

/// Build the table for one page.
///
/// # Arguments
///
/// * `location` - The page's location label, repeated in column 0
/// * `rows` - Clustered rows, top to bottom, index fragments already split off
/// * `layout` - Column dividers to align data fragments against
/// * `separator` - Joins fragments sharing a cell
///
/// # Errors
///
/// Returns [`Error::UnplacedFragment`] if a row has data fragments but the
/// layout has no data columns, and [`Error::RaggedRow`] if a row ends up with
/// the wrong width.
///
/// # Examples
///
/// ```
/// use pdf2table::layout::{assemble_table, ColumnLayout, Fragment, RowBucket};
///
/// let rows = vec![RowBucket {
///     divider: 105.0,
///     index: Some(Fragment::new(5.0, 100.0, 20.0, 108.0, "1")),
///     cells: vec![
///         Fragment::new(50.0, 100.0, 90.0, 108.0, "Alpha"),
///         Fragment::new(52.0, 92.0, 90.0, 100.0, "cont."),
///     ],
/// }];
/// let layout = ColumnLayout::new(vec![50.0]);
///
/// let table = assemble_table("Site A", &rows, &layout, "\\").unwrap();
/// assert_eq!(table.rows()[0], vec!["Site A", "1", "Alpha\\cont."]);
/// ```
pub fn assemble_table(
    location: &str,
    rows: &[RowBucket],
    layout: &ColumnLayout,
    separator: &str,
) -> Result<Table> {
    let location = location.trim();
    let mut table = Table::with_width(layout.column_count());

    for (row_idx, bucket) in rows.iter().enumerate() {
        let mut cells = vec![String::new(); layout.column_count()];
        cells[0] = location.to_string();
        cells[1] = bucket.index_text().to_string();

        for fragment in &bucket.cells {
            let column = layout
                .column_for(fragment.x0)
                .filter(|&column| column < cells.len())
                .ok_or_else(|| Error::UnplacedFragment {
                    row: row_idx,
                    text: fragment.trimmed().to_string(),
                })?;

            let cell = &mut cells[column];
            if !cell.is_empty() {
                cell.push_str(separator);
            }
            cell.push_str(fragment.trimmed());
        }

        table.push_row(cells)?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fragment::Fragment;

    fn bucket(index: &str, cells: &[(f32, f32, &str)]) -> RowBucket {
        RowBucket {
            divider: 0.0,
            index: Some(Fragment::new(5.0, 0.0, 20.0, 8.0, index)),
            cells: cells
                .iter()
                .map(|&(x, y, text)| Fragment::new(x, y, x + 30.0, y + 8.0, text))
                .collect(),
        }
    }

    #[test]
    fn test_empty_data_cells_are_kept() {
        let layout = ColumnLayout::new(vec![50.0, 150.0]);
        let rows = vec![bucket("1", &[(150.0, 0.0, "x")]), bucket("2", &[])];
        let table = assemble_table(" Site A ", &rows, &layout, "\\").unwrap();

        assert_eq!(table.rows()[0], vec!["Site A", "1", "", "x"]);
        assert_eq!(table.rows()[1], vec!["Site A", "2", "", ""]);
    }

    #[test]
    fn test_beyond_last_divider_lands_in_last_column() {
        let layout = ColumnLayout::new(vec![50.0, 150.0]);
        let rows = vec![bucket("1", &[(900.0, 0.0, "far right")])];
        let table = assemble_table("L", &rows, &layout, "\\").unwrap();
        assert_eq!(table.rows()[0][3], "far right");
    }

    #[test]
    fn test_merge_uses_separator() {
        let layout = ColumnLayout::new(vec![50.0]);
        let rows = vec![bucket("1", &[(50.0, 10.0, "a"), (55.0, 0.0, " b ")])];
        let table = assemble_table("L", &rows, &layout, " | ").unwrap();
        assert_eq!(table.rows()[0][2], "a | b");
    }

    #[test]
    fn test_row_without_index() {
        let layout = ColumnLayout::new(vec![50.0]);
        let mut row = bucket("", &[(60.0, 0.0, "orphan")]);
        row.index = None;
        let table = assemble_table("L", &[row], &layout, "\\").unwrap();
        assert_eq!(table.rows()[0], vec!["L", "", "orphan"]);
    }

    #[test]
    fn test_no_data_columns() {
        let layout = ColumnLayout::default();
        let ok = assemble_table("L", &[bucket("1", &[])], &layout, "\\").unwrap();
        assert_eq!(ok.rows()[0], vec!["L", "1"]);

        let err = assemble_table("L", &[bucket("1", &[(60.0, 0.0, "lost")])], &layout, "\\");
        assert!(matches!(err, Err(Error::UnplacedFragment { row: 0, .. })));
    }

    #[test]
    fn test_no_rows() {
        let table = assemble_table("L", &[], &ColumnLayout::new(vec![50.0]), "\\").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.width(), 3);
    }
}
