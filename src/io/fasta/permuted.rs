//! Re-ordered or subset view over another collection
//!
//! A [`PermutedView`] stores only a list of positions into its underlying
//! collection. Shuffled epochs, train/validation splits and subsamples are
//! all views: no record bytes are copied.
//!
//! ```
//! use fastaview::io::fasta::{FastaIndex, PermutedView, RecordCollection, TextEncoding};
//!
//! let index = FastaIndex::build(b">a\nA\n>b\nC\n>c\nG\n".to_vec(), TextEncoding::Ascii)?;
//! let reversed = PermutedView::build(&index, vec![2, 1, 0])?;
//! assert_eq!(reversed.get(0)?.id, "c");
//! # Ok::<(), fastaview::FastaError>(())
//! ```

use super::access::{resolve_all, resolve_index, RecordCollection, Slice};
use crate::error::{FastaError, Result};
use crate::types::FastaRecord;
use tracing::debug;

/// Collection whose position `k` is position `indexes[k]` of `inner`
#[derive(Debug, Clone)]
pub struct PermutedView<C> {
    inner: C,
    indexes: Vec<usize>,
}

impl<C: RecordCollection> PermutedView<C> {
    /// Wrap `inner`, remapping positions through `indexes`
    ///
    /// Every entry is checked against `inner.len()` here, so a bad entry
    /// fails construction instead of a later fetch.
    ///
    /// # Errors
    ///
    /// - [`FastaError::EmptyIndexList`] if `indexes` is empty
    /// - [`FastaError::IndexOutOfRange`] for the first entry `>= inner.len()`
    pub fn build(inner: C, indexes: Vec<usize>) -> Result<Self> {
        if indexes.is_empty() {
            return Err(FastaError::EmptyIndexList);
        }

        let len = inner.len();
        if let Some(&bad) = indexes.iter().find(|&&i| i >= len) {
            return Err(FastaError::IndexOutOfRange {
                index: bad as isize,
                len,
            });
        }

        debug!(records = indexes.len(), underlying = len, "built permuted view");
        Ok(Self { inner, indexes })
    }

    /// Positions into the underlying collection
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// Underlying collection
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Drop the view and return the underlying collection
    pub fn into_inner(self) -> C {
        self.inner
    }

    fn fetch(&self, position: usize) -> Result<FastaRecord> {
        self.inner.get(self.indexes[position] as isize)
    }
}

impl<C: RecordCollection> RecordCollection for PermutedView<C> {
    fn len(&self) -> usize {
        self.indexes.len()
    }

    fn get(&self, index: isize) -> Result<FastaRecord> {
        let position = resolve_index(index, self.indexes.len())?;
        self.fetch(position)
    }

    fn get_range(&self, slice: Slice) -> Result<Vec<FastaRecord>> {
        slice
            .indices(self.indexes.len())?
            .map(|position| self.fetch(position))
            .collect()
    }

    fn get_many(&self, indexes: &[isize]) -> Result<Vec<FastaRecord>> {
        resolve_all(indexes, self.indexes.len())?
            .into_iter()
            .map(|position| self.fetch(position))
            .collect()
    }
}
