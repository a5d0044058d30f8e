//! Integration tests for table reconstruction.
//!
//! Pages are built from mock fragments laid out the way the source reports
//! are: three boundary lines, a heading, one location label, an index column
//! on the left edge and a centred page number at the bottom.

use pdf2table::{
    ColumnLayout, Error, Fragment, PageErrorPolicy, PageRange, PagedFragments,
    ReconstructionConfig, ReconstructionWarning, TableReconstructor,
};
use proptest::prelude::*;

// ============================================================================
// Helper Functions for Creating Mock Data
// ============================================================================

/// A fragment whose box is 8 units tall and sized to its text.
fn mock_fragment(x0: f32, y0: f32, text: &str) -> Fragment {
    let width = (text.len() as f32 * 5.0).max(5.0);
    Fragment::new(x0, y0, x0 + width, y0 + 8.0, text)
}

/// An index fragment in the left-hand line-number column.
fn mock_index(y0: f32, text: &str) -> Fragment {
    Fragment::new(5.0, y0, 20.0, y0 + 8.0, text)
}

/// Wrap table fragments into a complete page.
fn mock_page(location: &str, page_number: u32, table: Vec<Fragment>) -> Vec<Fragment> {
    let mut fragments = vec![
        mock_fragment(0.0, 760.0, "**********"),
        mock_fragment(100.0, 730.0, "Monthly Rainfall Report"),
        mock_fragment(100.0, 715.0, "Issued by the Bureau"),
        mock_fragment(0.0, 700.0, "**********"),
        mock_fragment(10.0, 680.0, location),
        mock_fragment(0.0, 660.0, "**********"),
        mock_fragment(280.0, 20.0, &format!("- {} -", page_number)),
    ];
    fragments.extend(table);
    fragments
}

fn rows_of(table: &pdf2table::Table) -> Vec<Vec<&str>> {
    table
        .rows()
        .iter()
        .map(|row| row.iter().map(String::as_str).collect())
        .collect()
}

// ============================================================================
// Single page
// ============================================================================

#[test]
fn test_two_row_page() {
    let fragments = mock_page(
        "Site A",
        1,
        vec![
            Fragment::new(5.0, 100.0, 20.0, 108.0, "1"),
            mock_fragment(50.0, 100.0, "Alpha"),
            Fragment::new(5.0, 80.0, 20.0, 88.0, "2"),
            mock_fragment(50.0, 80.0, "Beta"),
        ],
    );

    let page = TableReconstructor::default()
        .reconstruct_page(fragments, None)
        .unwrap();

    assert_eq!(page.page_number, 1);
    assert_eq!(page.location, "Site A");
    assert_eq!(page.headers, vec!["Monthly Rainfall Report", "Issued by the Bureau"]);
    assert_eq!(rows_of(&page.table), vec![vec!["Site A", "1", "Alpha"], vec!["Site A", "2", "Beta"]]);
    assert_eq!(page.layout.dividers(), &[50.0]);
    assert!(page.warnings.is_empty());
}

#[test]
fn test_fragment_order_does_not_matter() {
    let mut fragments = mock_page(
        "Site A",
        1,
        vec![
            mock_index(100.0, "1"),
            mock_fragment(50.0, 100.0, "Alpha"),
            mock_fragment(150.0, 100.0, "10.5"),
            mock_index(80.0, "2"),
            mock_fragment(50.0, 80.0, "Beta"),
            mock_fragment(152.0, 80.0, "7.25"),
        ],
    );
    let reconstructor = TableReconstructor::default();
    let expected = reconstructor.reconstruct_page(fragments.clone(), None).unwrap();

    fragments.reverse();
    let reversed = reconstructor.reconstruct_page(fragments, None).unwrap();
    assert_eq!(reversed.table, expected.table);
    assert_eq!(rows_of(&expected.table)[1], vec!["Site A", "2", "Beta", "7.25"]);
}

#[test]
fn test_index_without_data_yields_empty_cells() {
    let fragments = mock_page(
        "Site B",
        4,
        vec![
            mock_index(100.0, "1"),
            mock_fragment(50.0, 100.0, "Alpha"),
            mock_fragment(200.0, 100.0, "12"),
            mock_index(80.0, "2"),
        ],
    );

    let page = TableReconstructor::default()
        .reconstruct_page(fragments, None)
        .unwrap();
    assert_eq!(rows_of(&page.table)[1], vec!["Site B", "2", "", ""]);
}

#[test]
fn test_wrapped_cell_is_merged_with_backslash() {
    let fragments = mock_page(
        "Site A",
        1,
        vec![
            mock_index(100.0, "1"),
            mock_fragment(50.0, 100.0, "North"),
            mock_fragment(50.0, 91.0, "Ridge"),
            mock_fragment(150.0, 100.0, "3.2"),
            mock_index(70.0, "2"),
            mock_fragment(50.0, 70.0, "Valley"),
        ],
    );

    let page = TableReconstructor::default()
        .reconstruct_page(fragments, None)
        .unwrap();
    assert_eq!(
        rows_of(&page.table),
        vec![
            vec!["Site A", "1", "North\\Ridge", "3.2"],
            vec!["Site A", "2", "Valley", ""],
        ]
    );
}

#[test]
fn test_malformed_page_number_rejects_page() {
    let mut fragments = mock_page("Site A", 1, vec![mock_index(100.0, "1")]);
    fragments.retain(|f| f.text != "- 1 -");
    fragments.push(mock_fragment(280.0, 20.0, "Page 1 of 3"));

    let result = TableReconstructor::default().reconstruct_page(fragments, None);
    assert!(matches!(result, Err(Error::MalformedPageNumber(_))));
}

#[test]
fn test_page_without_index_column_warns() {
    let fragments = mock_page("Site A", 1, vec![mock_fragment(50.0, 100.0, "Alpha")]);
    let page = TableReconstructor::default()
        .reconstruct_page(fragments, None)
        .unwrap();

    assert!(page.table.is_empty());
    assert_eq!(
        page.warnings,
        vec![ReconstructionWarning::NoIndexFragments { discarded: 1 }]
    );
}

// ============================================================================
// Multi-page runs
// ============================================================================

fn report() -> Vec<Vec<Fragment>> {
    vec![
        // Template page: three data columns
        mock_page(
            "Site A",
            1,
            vec![
                mock_index(100.0, "1"),
                mock_fragment(50.0, 100.0, "Jan"),
                mock_fragment(150.0, 100.0, "10"),
                mock_fragment(250.0, 100.0, "ok"),
                mock_index(80.0, "2"),
                mock_fragment(50.0, 80.0, "Feb"),
                mock_fragment(150.0, 80.0, "12"),
            ],
        ),
        // Only two columns populated, and slightly shifted
        mock_page(
            "Site B",
            2,
            vec![
                mock_index(100.0, "3"),
                mock_fragment(53.0, 100.0, "Mar"),
                mock_fragment(255.0, 100.0, "late"),
            ],
        ),
        mock_page(
            "Site C",
            3,
            vec![mock_index(100.0, "4"), mock_fragment(151.0, 100.0, "9")],
        ),
    ]
}

#[test]
fn test_template_aligns_every_page() {
    let mut source = report();
    let output = TableReconstructor::default()
        .run(&mut source, Some(0), PageRange::all(3))
        .unwrap();

    assert_eq!(output.layout, Some(ColumnLayout::new(vec![50.0, 150.0, 250.0])));
    assert!(output.pages.iter().all(|(_, p)| p.layout.column_count() == 5));

    let combined = output.combined().unwrap();
    assert_eq!(
        rows_of(&combined),
        vec![
            vec!["Site A", "1", "Jan", "10", "ok"],
            vec!["Site A", "2", "Feb", "12", ""],
            vec!["Site B", "3", "Mar", "", "late"],
            vec!["Site C", "4", "", "9", ""],
        ]
    );
}

#[test]
fn test_per_page_layouts_cannot_be_combined() {
    let mut source = report();
    let output = TableReconstructor::default()
        .run(&mut source, None, PageRange::all(3))
        .unwrap();

    assert!(output.layout.is_none());
    assert_eq!(output.pages[2].1.layout.dividers(), &[151.0]);
    assert!(matches!(output.combined(), Err(Error::Page { page: 1, .. })));
}

#[test]
fn test_template_outside_range() {
    let mut source = report();
    let output = TableReconstructor::default()
        .run(&mut source, Some(0), PageRange::new(1, 3).unwrap())
        .unwrap();

    let pages: Vec<usize> = output.pages.iter().map(|(page, _)| *page).collect();
    assert_eq!(pages, vec![1, 2]);
    assert_eq!(output.combined().unwrap().width(), 5);
}

#[test]
fn test_run_with_imported_layout() {
    let mut source = PagedFragments::from(report());
    let layout: ColumnLayout = serde_json::from_str("[250.0, 50.0, 150.0]").unwrap();
    let output = TableReconstructor::default()
        .run_with_layout(&mut source, layout, PageRange::single(2))
        .unwrap();

    assert_eq!(rows_of(&output.combined().unwrap()), vec![vec!["Site C", "4", "", "9", ""]]);
}

#[test]
fn test_bad_page_aborts_by_default() {
    let mut source = report();
    source[1].retain(|f| f.text != "Site B");

    let result = TableReconstructor::default().run(&mut source, Some(0), PageRange::all(3));
    match result {
        Err(Error::Page { page, source }) => {
            assert_eq!(page, 1);
            assert!(matches!(*source, Error::LocationCount { found: 0 }));
        },
        other => panic!("unexpected: {:?}", other.map(|o| o.pages.len())),
    }
}

#[test]
fn test_bad_page_skipped_by_policy() {
    let mut source = report();
    source[1].retain(|f| f.text != "Site B");

    let config = ReconstructionConfig::default().with_page_error_policy(PageErrorPolicy::Skip);
    let output = TableReconstructor::new(config)
        .unwrap()
        .run(&mut source, Some(0), PageRange::all(3))
        .unwrap();

    assert_eq!(output.pages.len(), 2);
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].page, 1);
    assert!(output.skipped[0].reason.contains("LOCATION"));
    assert_eq!(output.combined().unwrap().len(), 3);
}

#[test]
fn test_bad_template_page_always_aborts() {
    let mut source = report();
    source[0].clear();

    let config = ReconstructionConfig::default().with_page_error_policy(PageErrorPolicy::Skip);
    let result = TableReconstructor::new(config)
        .unwrap()
        .run(&mut source, Some(0), PageRange::all(3));
    assert!(matches!(result, Err(Error::Page { page: 0, .. })));
}

#[test]
fn test_range_past_last_page() {
    let mut source = report();
    let result = TableReconstructor::default().run(&mut source, None, PageRange::new(0, 4).unwrap());
    assert!(matches!(result, Err(Error::PageOutOfRange { page_count: 3, .. })));
}

// ============================================================================
// Properties
// ============================================================================

/// Rows of (index y, data cells as (x0, text)) spread down the page.
fn arb_rows() -> impl Strategy<Value = Vec<Vec<(f32, String)>>> {
    prop::collection::vec(
        prop::collection::vec((45.0f32..500.0, "[a-z]{1,6}"), 0..5),
        1..12,
    )
}

fn page_from_rows(rows: &[Vec<(f32, String)>]) -> Vec<Fragment> {
    let mut table = Vec::new();
    for (i, cells) in rows.iter().enumerate() {
        let y = 600.0 - i as f32 * 20.0;
        table.push(mock_index(y, &(i + 1).to_string()));
        for (x, text) in cells {
            table.push(Fragment::new(*x, y, x + 10.0, y + 8.0, text.clone()));
        }
    }
    mock_page("Site P", 1, table)
}

proptest! {
    #[test]
    fn prop_rows_are_rectangular(rows in arb_rows()) {
        let page = TableReconstructor::default()
            .reconstruct_page(page_from_rows(&rows), None)
            .unwrap();

        prop_assert_eq!(page.table.len(), rows.len());
        let width = 2 + page.layout.dividers().len();
        for row in page.table.rows() {
            prop_assert_eq!(row.len(), width);
        }
    }

    #[test]
    fn prop_template_is_deterministic(
        rows in arb_rows(),
        dividers in prop::collection::vec(40.0f32..520.0, 1..6),
    ) {
        let reconstructor = TableReconstructor::default();
        let layout = ColumnLayout::new(dividers);
        let first = reconstructor
            .reconstruct_page(page_from_rows(&rows), Some(&layout))
            .unwrap();
        let second = reconstructor
            .reconstruct_page(page_from_rows(&rows), Some(&layout))
            .unwrap();

        prop_assert_eq!(&first.table, &second.table);
        prop_assert_eq!(&first.layout, &layout);
    }

    #[test]
    fn prop_derived_dividers_respect_padding(rows in arb_rows()) {
        let page = TableReconstructor::default()
            .reconstruct_page(page_from_rows(&rows), None)
            .unwrap();
        prop_assert!(page.layout.narrow_gaps(30.0).is_empty());
    }
}
