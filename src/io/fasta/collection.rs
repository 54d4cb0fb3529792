//! Several record collections addressed as one
//!
//! A [`FastaCollection`] concatenates its children in order. Global position
//! `p` is mapped to a child by binary search over the cumulative record
//! counts, so lookup is O(log n) in the number of children and shuffled
//! batches may mix children freely.

use super::access::{resolve_all, resolve_index, RecordCollection, Slice};
use super::index::FastaIndex;
use super::FastaOptions;
use crate::error::{FastaError, Result};
use crate::io::source::DataSource;
use crate::types::FastaRecord;
use tracing::debug;

/// Ordered concatenation of record collections
///
/// Children are immutable once added, so the cumulative table never goes
/// stale. Children may be owned indices or shared handles (`&C`, `Arc<C>`).
#[derive(Debug)]
pub struct FastaCollection<C = FastaIndex> {
    children: Vec<C>,
    /// `cumulative[k]` = records in `children[0..=k]`
    cumulative: Vec<usize>,
}

impl<C: RecordCollection> FastaCollection<C> {
    /// Concatenate `children` in order
    ///
    /// # Errors
    ///
    /// [`FastaError::EmptyCollection`] if `children` is empty.
    pub fn build(children: Vec<C>) -> Result<Self> {
        if children.is_empty() {
            return Err(FastaError::EmptyCollection);
        }

        let cumulative: Vec<usize> = children
            .iter()
            .scan(0usize, |total, child| {
                *total += child.len();
                Some(*total)
            })
            .collect();

        debug!(
            children = children.len(),
            records = cumulative.last().copied().unwrap_or(0),
            "built FASTA collection"
        );
        Ok(Self {
            children,
            cumulative,
        })
    }

    /// Child collections, in order
    pub fn children(&self) -> &[C] {
        &self.children
    }

    /// Cumulative record counts, one per child
    pub fn cumulative(&self) -> &[usize] {
        &self.cumulative
    }

    /// Map a non-negative global position to `(child, local position)`
    ///
    /// # Example
    ///
    /// ```
    /// use fastaview::io::fasta::{FastaCollection, FastaIndex, TextEncoding};
    ///
    /// let a = FastaIndex::build(b">a1\nA\n>a2\nC\n".to_vec(), TextEncoding::Ascii)?;
    /// let b = FastaIndex::build(b">b1\nG\n".to_vec(), TextEncoding::Ascii)?;
    /// let collection = FastaCollection::build(vec![a, b])?;
    ///
    /// assert_eq!(collection.locate(1)?, (0, 1));
    /// assert_eq!(collection.locate(2)?, (1, 0));
    /// # Ok::<(), fastaview::FastaError>(())
    /// ```
    pub fn locate(&self, position: usize) -> Result<(usize, usize)> {
        // First child whose cumulative count exceeds the position
        let child = self.cumulative.partition_point(|&total| total <= position);
        if child == self.children.len() {
            return Err(FastaError::IndexOutOfRange {
                index: position as isize,
                len: self.total(),
            });
        }

        let before = if child == 0 { 0 } else { self.cumulative[child - 1] };
        Ok((child, position - before))
    }

    fn total(&self) -> usize {
        self.cumulative.last().copied().unwrap_or(0)
    }

    fn fetch(&self, position: usize) -> Result<FastaRecord> {
        let (child, local) = self.locate(position)?;
        self.children[child].get(local as isize)
    }
}

impl FastaCollection<FastaIndex> {
    /// Open and index every input, then concatenate them in order
    ///
    /// # Errors
    ///
    /// [`FastaError::EmptyCollection`] if `inputs` is empty; the first
    /// open or indexing error otherwise. No partial collection is returned.
    pub fn open<I, D>(inputs: I, options: &FastaOptions) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<DataSource>,
    {
        let children = inputs
            .into_iter()
            .map(|input| FastaIndex::open(input, options))
            .collect::<Result<Vec<_>>>()?;
        Self::build(children)
    }
}

impl<C: RecordCollection> RecordCollection for FastaCollection<C> {
    fn len(&self) -> usize {
        self.total()
    }

    fn get(&self, index: isize) -> Result<FastaRecord> {
        let position = resolve_index(index, self.total())?;
        self.fetch(position)
    }

    fn get_range(&self, slice: Slice) -> Result<Vec<FastaRecord>> {
        slice
            .indices(self.total())?
            .map(|position| self.fetch(position))
            .collect()
    }

    fn get_many(&self, indexes: &[isize]) -> Result<Vec<FastaRecord>> {
        resolve_all(indexes, self.total())?
            .into_iter()
            .map(|position| self.fetch(position))
            .collect()
    }
}
