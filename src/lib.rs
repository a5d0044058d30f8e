// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # pdf2table
//!
//! Rebuilds tabular report data from the positioned text fragments of PDF
//! pages.
//!
//! ## Core Features
//!
//! - **Page Segmentation**: splits a page into headers, a location label and a
//!   table on asterisk boundary lines, validating the `- N -` page number
//! - **Row Clustering**: rows anchored on the narrow index column at the left
//!   edge of the table
//! - **Column Dividers**: greedy left-to-right clustering of fragment edges
//! - **Cell Assembly**: rectangular rows with wrapped values merged per cell
//! - **Templates**: one page's column layout reused across a whole run so
//!   every page yields rows of the same width
//!
//! ## Architecture
//! - **Stage Values**: `RawPage → SegmentedPage → ClusteredPage → AlignedPage → PageTable`
//! - **Pluggable Input**: any document decoder can feed pages through
//!   [`FragmentSource`]
//! - **No Output Format**: tables are plain rows of strings; writing them is
//!   left to the caller
//!
//! ## Quick Start
//!
//! ```
//! use pdf2table::{Fragment, PageRange, TableReconstructor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! fn page(number: u32, rows: &[(&str, &str, f32)]) -> Vec<Fragment> {
//!     let mut fragments = vec![
//!         Fragment::new(0.0, 700.0, 60.0, 708.0, "*****"),
//!         Fragment::new(0.0, 600.0, 60.0, 608.0, "*****"),
//!         Fragment::new(10.0, 550.0, 80.0, 558.0, "Site A"),
//!         Fragment::new(0.0, 500.0, 60.0, 508.0, "*****"),
//!         Fragment::new(280.0, 10.0, 300.0, 18.0, format!("- {} -", number)),
//!     ];
//!     for &(index, value, y) in rows {
//!         fragments.push(Fragment::new(5.0, y, 20.0, y + 8.0, index));
//!         fragments.push(Fragment::new(50.0, y, 90.0, y + 8.0, value));
//!     }
//!     fragments
//! }
//!
//! let mut pages = vec![
//!     page(1, &[("1", "Alpha", 100.0), ("2", "Beta", 80.0)]),
//!     page(2, &[("3", "Gamma", 100.0)]),
//! ];
//!
//! let reconstructor = TableReconstructor::default();
//! let output = reconstructor.run(&mut pages, Some(0), PageRange::all(2))?;
//! let table = output.combined()?;
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.rows()[2], vec!["Site A", "3", "Gamma"]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometric searches
pub mod geometry;

// Per-page reconstruction stages
pub mod layout;

// Multi-page orchestration
pub mod pipeline;

// Re-exports
pub use config::{PageErrorPolicy, ReconstructionConfig};
pub use error::{Error, Result};
pub use layout::{ColumnLayout, Fragment, Section, Table};
pub use pipeline::{
    AssembleTable, FragmentSource, PageRange, PageTable, PagedFragments, ReconstructionWarning,
    RunOutput, TableReconstructor,
};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
