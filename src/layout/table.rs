//! Rectangular tables of cell strings.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A table whose rows all have the same number of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct Table {
    width: usize,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with a fixed width.
    pub fn with_width(width: usize) -> Self {
        Self {
            width,
            rows: Vec::new(),
        }
    }

    /// Build a table from rows, checking that every row has the same width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RaggedRow`] for the first row whose width differs from
    /// the first row's.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf2table::layout::Table;
    ///
    /// let table = Table::from_rows(vec![
    ///     vec!["Site A".to_string(), "1".to_string()],
    ///     vec!["Site A".to_string(), "2".to_string()],
    /// ]).unwrap();
    /// assert_eq!(table.width(), 2);
    /// assert_eq!(table.len(), 2);
    ///
    /// assert!(Table::from_rows(vec![vec!["a".to_string()], vec![]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let mut table = Self::with_width(width);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RaggedRow`] if the row's width differs from the table's.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.width {
            return Err(Error::RaggedRow {
                row: self.rows.len(),
                found: row.len(),
                expected: self.width,
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append every row of another table.
    ///
    /// An empty table adopts the other table's width, so pages can be folded
    /// into a run-wide table starting from [`Table::default`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::RaggedRow`] if both tables have rows and their widths
    /// differ. Nothing is appended in that case.
    pub fn append(&mut self, other: Table) -> Result<()> {
        if other.is_empty() {
            return Ok(());
        }
        if self.is_empty() {
            self.width = other.width;
        } else if other.width != self.width {
            return Err(Error::RaggedRow {
                row: self.rows.len(),
                found: other.width,
                expected: self.width,
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// Number of cells in every row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows, top to bottom.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Consume the table, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl TryFrom<Vec<Vec<String>>> for Table {
    type Error = Error;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Table> for Vec<Vec<String>> {
    fn from(table: Table) -> Self {
        table.rows
    }
}
