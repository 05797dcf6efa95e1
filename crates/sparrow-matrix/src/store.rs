//! Sparse matrix store.
//!
//! The authoritative set of non-zero entries of an R×C matrix, keyed by
//! 1-based `(row, col)`. Entries are held in a `BTreeMap`, so traversal
//! is always ascending by row, then column, and every converter can
//! build its output in one linear pass.
//!
//! ## Zero handling
//! - `assign` / `update` with an exact zero are no-ops.
//! - `assign` onto an existing entry accumulates; if the sum is exactly
//!   zero the entry stays stored and counted.
//! - `scale` never prunes.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sparrow_types::{is_zero, SparrowError, SparrowResult};

/// A stored `(row, col, value)` triple (1-based indices).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Row number, `1..=rows`.
    pub row: usize,
    /// Column number, `1..=cols`.
    pub col: usize,
    /// Stored value.
    pub value: f64,
}

impl Element {
    /// Creates a new element.
    #[inline]
    pub fn new(row: usize, col: usize, value: f64) -> Self {
        Self { row, col, value }
    }
}

impl From<(usize, usize, f64)> for Element {
    fn from((row, col, value): (usize, usize, f64)) -> Self {
        Self { row, col, value }
    }
}

/// Mutable sparse matrix with fixed (but reshapeable) dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    entries: BTreeMap<(usize, usize), f64>,
}

impl SparseMatrix {
    /// Creates an empty `rows × cols` matrix.
    ///
    /// Both dimensions must be non-zero.
    pub fn new(rows: usize, cols: usize) -> SparrowResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(SparrowError::DimensionMismatch(format!(
                "Matrix dimensions must be non-zero, got {rows}×{cols}"
            )));
        }
        Ok(Self {
            rows,
            cols,
            entries: BTreeMap::new(),
        })
    }

    /// Empty matrix for dimensions already known to be non-zero.
    pub(crate) fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: BTreeMap::new(),
        }
    }

    /// Creates a matrix and `assign`s every element into it.
    ///
    /// Duplicate coordinates are summed.
    pub fn from_elements<I, E>(rows: usize, cols: usize, elements: I) -> SparrowResult<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        let mut matrix = Self::new(rows, cols)?;
        for e in elements {
            let e = e.into();
            matrix.assign(e.row, e.col, e.value)?;
        }
        Ok(matrix)
    }

    /// Number of rows.
    #[inline]
    pub fn number_of_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn number_of_columns(&self) -> usize {
        self.cols
    }

    /// Number of stored entries (including entries that accumulated to zero).
    #[inline]
    pub fn number_of_elements(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Bounds check for a 1-based coordinate.
    pub fn check_index(&self, row: usize, col: usize) -> SparrowResult<()> {
        if row < 1 || row > self.rows || col < 1 || col > self.cols {
            return Err(SparrowError::InvalidIndex {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Adds `value` at `(row, col)`, inserting the entry if absent.
    pub fn assign(&mut self, row: usize, col: usize, value: f64) -> SparrowResult<()> {
        self.check_index(row, col)?;
        self.accumulate(row, col, value);
        Ok(())
    }

    /// Sets `(row, col)` to `value`, replacing any existing entry.
    pub fn update(&mut self, row: usize, col: usize, value: f64) -> SparrowResult<()> {
        self.check_index(row, col)?;
        if !is_zero(value) {
            self.entries.insert((row, col), value);
        }
        Ok(())
    }

    /// Returns the stored value, or zero if absent.
    pub fn get(&self, row: usize, col: usize) -> SparrowResult<f64> {
        self.check_index(row, col)?;
        Ok(self.value_at(row, col))
    }

    /// Removes the entry at `(row, col)`. Returns whether it was present.
    pub fn remove(&mut self, row: usize, col: usize) -> bool {
        self.entries.remove(&(row, col)).is_some()
    }

    /// Returns true if an entry is stored at `(row, col)`.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.entries.contains_key(&(row, col))
    }

    /// Removes all entries. Dimensions are unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Ascending `(row, col)` traversal of every stored entry.
    pub fn iter(&self) -> Elements<'_> {
        Elements {
            inner: self.entries.range::<(usize, usize), _>(..),
        }
    }

    /// Stored entries of one row, ascending by column.
    pub(crate) fn row_entries(&self, row: usize) -> Elements<'_> {
        Elements {
            inner: self.entries.range((row, 1)..=(row, usize::MAX)),
        }
    }

    /// Value lookup without a bounds check.
    #[inline]
    pub(crate) fn value_at(&self, row: usize, col: usize) -> f64 {
        self.entries.get(&(row, col)).copied().unwrap_or(0.0)
    }

    /// `assign` without a bounds check. Callers guarantee the coordinate
    /// lies inside the matrix.
    pub(crate) fn accumulate(&mut self, row: usize, col: usize, value: f64) {
        if is_zero(value) {
            return;
        }
        *self.entries.entry((row, col)).or_insert(0.0) += value;
    }

    pub(crate) fn values_mut(&mut self) -> btree_map::ValuesMut<'_, (usize, usize), f64> {
        self.entries.values_mut()
    }
}

impl<'a> IntoIterator for &'a SparseMatrix {
    type Item = Element;
    type IntoIter = Elements<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over stored entries in ascending `(row, col)` order.
pub struct Elements<'a> {
    inner: btree_map::Range<'a, (usize, usize), f64>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = Element;

    #[inline]
    fn next(&mut self) -> Option<Element> {
        self.inner
            .next()
            .map(|(&(row, col), &value)| Element { row, col, value })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Elements<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Element> {
        self.inner
            .next_back()
            .map(|(&(row, col), &value)| Element { row, col, value })
    }
}
