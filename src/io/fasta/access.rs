//! Indexed access contract shared by every record collection
//!
//! [`FastaIndex`](super::FastaIndex), [`FastaCollection`](super::FastaCollection)
//! and [`PermutedView`](super::PermutedView) all expose the same four
//! operations: length, single fetch, strided range fetch and fancy (list)
//! fetch. Positions are `isize` so callers may count from the end: `-1` is
//! the last record, `-len` the first.
//!
//! Each collection implements the operations itself on top of two shared
//! helpers, [`resolve_index`] and [`Slice::indices`], so all three agree on
//! negative-index and slicing rules.

use crate::error::{FastaError, Result};
use crate::types::FastaRecord;
use std::iter::StepBy;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};
use std::sync::Arc;

/// Random-access collection of FASTA records
///
/// Every method is a pure function of the collection and its arguments;
/// nothing mutates after construction, so shared references may be read
/// from several threads at once.
pub trait RecordCollection {
    /// Number of records
    fn len(&self) -> usize;

    /// Check if the collection holds no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch one record; negative positions count from the end
    ///
    /// # Errors
    ///
    /// [`FastaError::IndexOutOfRange`] before any byte access if the position
    /// is outside `[-len, len)`; per-record decoding errors otherwise.
    fn get(&self, index: isize) -> Result<FastaRecord>;

    /// Fetch the records selected by `slice`, in ascending order
    fn get_range(&self, slice: Slice) -> Result<Vec<FastaRecord>>;

    /// Fetch one record per position, in the given order
    ///
    /// Positions may repeat and appear in any order. All positions are
    /// bounds-checked before the first record is read.
    fn get_many(&self, indexes: &[isize]) -> Result<Vec<FastaRecord>>;

    /// Iterate over every record, front to back
    fn iter(&self) -> Records<'_, Self>
    where
        Self: Sized,
    {
        Records::new(self)
    }
}

/// Normalise a possibly negative position against `len`
///
/// # Example
///
/// ```
/// use fastaview::io::fasta::resolve_index;
///
/// assert_eq!(resolve_index(-1, 4).unwrap(), 3);
/// assert_eq!(resolve_index(2, 4).unwrap(), 2);
/// assert!(resolve_index(4, 4).is_err());
/// assert!(resolve_index(-5, 4).is_err());
/// ```
pub fn resolve_index(index: isize, len: usize) -> Result<usize> {
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        Some(index as usize)
    };

    match resolved {
        Some(position) if position < len => Ok(position),
        _ => Err(FastaError::IndexOutOfRange { index, len }),
    }
}

/// Resolve every position before any of them is used
pub(crate) fn resolve_all(indexes: &[isize], len: usize) -> Result<Vec<usize>> {
    indexes.iter().map(|&i| resolve_index(i, len)).collect()
}

/// Half-open, strided selection of positions: `start..stop` by `step`
///
/// Missing bounds default to the whole collection. Negative bounds count
/// from the end, and out-of-range bounds are clamped rather than rejected,
/// so a slice never fails for being too wide. Only forward steps are
/// supported.
///
/// # Example
///
/// ```
/// use fastaview::io::fasta::Slice;
///
/// let every_other: Vec<usize> = Slice::full().step_by(2).indices(5)?.collect();
/// assert_eq!(every_other, vec![0, 2, 4]);
///
/// let tail: Vec<usize> = Slice::new(Some(-2), None, 1).indices(5)?.collect();
/// assert_eq!(tail, vec![3, 4]);
/// # Ok::<(), fastaview::FastaError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    /// First position (default 0)
    pub start: Option<isize>,
    /// One past the last position (default: collection length)
    pub stop: Option<isize>,
    /// Distance between selected positions; must be at least 1
    pub step: usize,
}

impl Slice {
    /// Create a slice from explicit bounds and step
    pub fn new(start: Option<isize>, stop: Option<isize>, step: usize) -> Self {
        Self { start, stop, step }
    }

    /// Every position
    pub fn full() -> Self {
        Self::new(None, None, 1)
    }

    /// Same bounds, different step
    pub fn step_by(self, step: usize) -> Self {
        Self { step, ..self }
    }

    /// Concrete positions this slice selects in a collection of `len` records
    ///
    /// # Errors
    ///
    /// [`FastaError::InvalidSlice`] if the step is zero.
    pub fn indices(&self, len: usize) -> Result<StepBy<Range<usize>>> {
        if self.step == 0 {
            return Err(FastaError::InvalidSlice("slice step cannot be zero".to_string()));
        }

        let start = self.start.map_or(0, |s| clamp_bound(s, len));
        let stop = self.stop.map_or(len, |s| clamp_bound(s, len));

        Ok((start..stop.max(start)).step_by(self.step))
    }
}

impl Default for Slice {
    fn default() -> Self {
        Self::full()
    }
}

/// Resolve a slice bound: negative counts from the end, then clamp to `[0, len]`
fn clamp_bound(bound: isize, len: usize) -> usize {
    if bound < 0 {
        len.saturating_sub(bound.unsigned_abs())
    } else {
        (bound as usize).min(len)
    }
}

/// Unsigned range bounds past `isize::MAX` saturate instead of wrapping negative
fn saturating_bound(bound: usize) -> isize {
    isize::try_from(bound).unwrap_or(isize::MAX)
}

impl From<Range<usize>> for Slice {
    fn from(range: Range<usize>) -> Self {
        Self::new(
            Some(saturating_bound(range.start)),
            Some(saturating_bound(range.end)),
            1,
        )
    }
}

impl From<RangeFrom<usize>> for Slice {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::new(Some(saturating_bound(range.start)), None, 1)
    }
}

impl From<RangeTo<usize>> for Slice {
    fn from(range: RangeTo<usize>) -> Self {
        Self::new(None, Some(saturating_bound(range.end)), 1)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

/// Iterator over every record of a collection, produced by [`RecordCollection::iter`]
///
/// Each step performs one fetch, so errors surface per record and do not
/// stop the iterator.
pub struct Records<'a, C: ?Sized> {
    collection: &'a C,
    front: usize,
    back: usize,
}

impl<'a, C: RecordCollection + ?Sized> Records<'a, C> {
    /// Iterate over all of `collection`
    pub fn new(collection: &'a C) -> Self {
        Self {
            collection,
            front: 0,
            back: collection.len(),
        }
    }
}

impl<C: RecordCollection + ?Sized> Iterator for Records<'_, C> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let position = self.front;
        self.front += 1;
        Some(self.collection.get(position as isize))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<C: RecordCollection + ?Sized> DoubleEndedIterator for Records<'_, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.collection.get(self.back as isize))
    }
}

impl<C: RecordCollection + ?Sized> ExactSizeIterator for Records<'_, C> {}

impl<C: RecordCollection + ?Sized> RecordCollection for &C {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: isize) -> Result<FastaRecord> {
        (**self).get(index)
    }

    fn get_range(&self, slice: Slice) -> Result<Vec<FastaRecord>> {
        (**self).get_range(slice)
    }

    fn get_many(&self, indexes: &[isize]) -> Result<Vec<FastaRecord>> {
        (**self).get_many(indexes)
    }
}

impl<C: RecordCollection + ?Sized> RecordCollection for Box<C> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: isize) -> Result<FastaRecord> {
        (**self).get(index)
    }

    fn get_range(&self, slice: Slice) -> Result<Vec<FastaRecord>> {
        (**self).get_range(slice)
    }

    fn get_many(&self, indexes: &[isize]) -> Result<Vec<FastaRecord>> {
        (**self).get_many(indexes)
    }
}

impl<C: RecordCollection + ?Sized> RecordCollection for Arc<C> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: isize) -> Result<FastaRecord> {
        (**self).get(index)
    }

    fn get_range(&self, slice: Slice) -> Result<Vec<FastaRecord>> {
        (**self).get_range(slice)
    }

    fn get_many(&self, indexes: &[isize]) -> Result<Vec<FastaRecord>> {
        (**self).get_many(indexes)
    }
}
