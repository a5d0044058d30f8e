//! Geometric table reconstruction for a single page.
//!
//! This module provides the per-page stages:
//! - Section segmentation on boundary fragments
//! - Row clustering anchored on the index column
//! - Greedy column divider derivation
//! - Cell assembly into a rectangular table

pub mod cell_assembler;
pub mod column_dividers;
pub mod fragment;
pub mod row_clusterer;
pub mod segmenter;
pub mod table;

// Re-export main types
pub use cell_assembler::assemble_table;
pub use column_dividers::{ColumnLayout, LEADING_COLUMNS};
pub use fragment::Fragment;
pub use row_clusterer::{RowBucket, RowClusters, cluster_rows};
pub use segmenter::{Section, SegmentedPage, segment_page};
pub use table::Table;
