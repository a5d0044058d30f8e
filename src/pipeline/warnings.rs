//! Non-fatal reconstruction conditions.
//!
//! These do not stop a page from producing a table, but the table they produce
//! is likely empty or misaligned.

use std::fmt;

/// A condition worth reporting about a reconstructed page.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconstructionWarning {
    /// The table section had content but no index fragments, so no rows exist
    NoIndexFragments {
        /// Table fragments that were discarded
        discarded: usize,
    },
    /// Fragments above the first row divider were clamped into the first row
    FragmentsAboveFirstRow {
        /// Number of clamped fragments
        count: usize,
    },
    /// A row ended up without its index fragment
    RowWithoutIndex {
        /// Zero-based row index
        row: usize,
    },
    /// Two adjacent column dividers are closer than the column padding
    NarrowColumnGap {
        /// Left divider
        left: f32,
        /// Right divider
        right: f32,
    },
    /// The table section held no content at all
    EmptyTable,
}

impl fmt::Display for ReconstructionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoIndexFragments { discarded } => {
                write!(f, "no index fragments, {} table fragments discarded", discarded)
            },
            Self::FragmentsAboveFirstRow { count } => {
                write!(f, "{} fragments above the first row were merged into it", count)
            },
            Self::RowWithoutIndex { row } => write!(f, "row {} has no index fragment", row),
            Self::NarrowColumnGap { left, right } => {
                write!(f, "column dividers {:.1} and {:.1} are closer than the padding", left, right)
            },
            Self::EmptyTable => write!(f, "table section is empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let warning = ReconstructionWarning::NarrowColumnGap {
            left: 50.0,
            right: 60.0,
        };
        assert_eq!(
            warning.to_string(),
            "column dividers 50.0 and 60.0 are closer than the padding"
        );
        assert!(ReconstructionWarning::NoIndexFragments { discarded: 3 }
            .to_string()
            .contains('3'));
    }
}
