//! Table reconstruction pipeline.
//!
//! ```text
//! FragmentSource (one page at a time)
//!     ↓
//! RawPage ─segment→ SegmentedPage ─cluster→ ClusteredPage
//!     ↓
//! ClusteredPage ─align (template or derived)→ AlignedPage
//!     ↓
//! AlignedPage ─assemble→ PageTable (location, table, column layout)
//! ```
//!
//! # Key Design Principles
//!
//! 1. **Pure stage transitions**: every stage consumes the previous one and
//!    returns a new value, so intermediate states can be inspected and tested.
//!
//! 2. **Write-once layout**: a run's column layout is fixed by its template
//!    page and only read afterwards.
//!
//! 3. **All-or-nothing pages**: a page either yields a full table or an error;
//!    the run policy decides whether that error aborts or skips.

pub mod reconstructor;
pub mod source;
pub mod stages;
pub mod warnings;

// Re-export main types
pub use reconstructor::{PageRange, RunOutput, SkippedPage, TableReconstructor};
pub use source::{FragmentSource, PagedFragments};
pub use stages::{AlignedPage, AssembleTable, ClusteredPage, PageTable, RawPage};
pub use warnings::ReconstructionWarning;
