//! FASTA random access: record index, multi-file collections and views
//!
//! This module provides:
//! - A record codec turning one marker-to-marker span into a [`FastaRecord`]
//! - [`FastaIndex`]: one memory-mapped file, indexed by record position
//! - [`FastaCollection`]: several indices addressed as one
//! - [`PermutedView`]: a re-ordered or subset view over any collection
//! - [`open_fastas`]: picks a single index or a collection for a list of inputs
//!
//! All of them implement [`RecordCollection`], so batch loaders can fetch
//! by position, by strided range, or by an arbitrary list of positions
//! without knowing which one they hold.
//!
//! # Basic Usage
//!
//! ```no_run
//! use fastaview::io::fasta::{open_fastas, FastaOptions, RecordCollection, Slice};
//!
//! # fn main() -> fastaview::Result<()> {
//! let dataset = open_fastas(["train_a.fa", "train_b.fa"], &FastaOptions::default())?;
//! println!("{} records", dataset.len());
//!
//! // Shuffled batch spanning both files
//! let batch = dataset.get_many(&[17, 3, -1, 42])?;
//!
//! // Every tenth record
//! let sample = dataset.get_range(Slice::full().step_by(10))?;
//! # Ok(())
//! # }
//! ```
//!
//! [`FastaRecord`]: crate::types::FastaRecord

mod access;
mod codec;
mod collection;
pub mod index;
mod permuted;

pub use access::{resolve_index, RecordCollection, Records, Slice};
pub use codec::{normalize_sequence, parse_record, TextEncoding, MARKER};
pub use collection::FastaCollection;
pub use index::{find_spans, FastaIndex, Span};
pub use permuted::PermutedView;

use crate::error::{FastaError, Result};
use crate::io::source::{AccessPattern, DataSource};
use crate::types::FastaRecord;
use tracing::debug;

/// Options applied to every file opened by [`open_fastas`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FastaOptions {
    /// Header text encoding (default ASCII)
    pub encoding: TextEncoding,
    /// Paging hint for memory-mapped files (default random)
    pub access: AccessPattern,
}

impl FastaOptions {
    /// Default options: ASCII headers, random access
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header text encoding
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the paging hint for memory-mapped files
    pub fn with_access(mut self, access: AccessPattern) -> Self {
        self.access = access;
        self
    }
}

/// Collection returned by [`open_fastas`]
#[derive(Debug)]
pub enum FastaDataset {
    /// Exactly one input
    Single(FastaIndex),
    /// Two or more inputs, concatenated in order
    Multi(FastaCollection<FastaIndex>),
}

impl RecordCollection for FastaDataset {
    fn len(&self) -> usize {
        match self {
            FastaDataset::Single(index) => index.len(),
            FastaDataset::Multi(collection) => collection.len(),
        }
    }

    fn get(&self, index: isize) -> Result<FastaRecord> {
        match self {
            FastaDataset::Single(single) => single.get(index),
            FastaDataset::Multi(collection) => collection.get(index),
        }
    }

    fn get_range(&self, slice: Slice) -> Result<Vec<FastaRecord>> {
        match self {
            FastaDataset::Single(index) => index.get_range(slice),
            FastaDataset::Multi(collection) => collection.get_range(slice),
        }
    }

    fn get_many(&self, indexes: &[isize]) -> Result<Vec<FastaRecord>> {
        match self {
            FastaDataset::Single(index) => index.get_many(indexes),
            FastaDataset::Multi(collection) => collection.get_many(indexes),
        }
    }
}

/// Open a list of FASTA inputs as one indexable dataset
///
/// Inputs may be paths, open [`File`](std::fs::File)s or in-memory bytes,
/// in any mix. One input yields [`FastaDataset::Single`]; more yield
/// [`FastaDataset::Multi`] with one [`FastaIndex`] per input, in order.
///
/// # Errors
///
/// [`FastaError::NoInputFiles`] if `inputs` is empty; otherwise the first
/// error from opening or indexing an input.
///
/// # Example
///
/// ```
/// use fastaview::io::fasta::{open_fastas, FastaDataset, FastaOptions, RecordCollection};
///
/// let file = b">seq1 desc one\nACGT\nAC\n>seq2\nggtt\n".to_vec();
/// let dataset = open_fastas(vec![file.clone(), file], &FastaOptions::default())?;
///
/// assert!(matches!(dataset, FastaDataset::Multi(_)));
/// assert_eq!(dataset.len(), 4);
/// assert_eq!(dataset.get(3)?.sequence, "GGTT");
/// # Ok::<(), fastaview::FastaError>(())
/// ```
pub fn open_fastas<I, D>(inputs: I, options: &FastaOptions) -> Result<FastaDataset>
where
    I: IntoIterator<Item = D>,
    D: Into<DataSource>,
{
    let mut sources: Vec<DataSource> = inputs.into_iter().map(Into::into).collect();

    let dataset = match sources.len() {
        0 => return Err(FastaError::NoInputFiles),
        1 => {
            let source = sources.remove(0);
            FastaDataset::Single(FastaIndex::open(source, options)?)
        }
        _ => FastaDataset::Multi(FastaCollection::open(sources, options)?),
    };

    debug!(inputs = dataset_inputs(&dataset), records = dataset.len(), "opened FASTA dataset");
    Ok(dataset)
}

fn dataset_inputs(dataset: &FastaDataset) -> usize {
    match dataset {
        FastaDataset::Single(_) => 1,
        FastaDataset::Multi(collection) => collection.children().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &[u8] = b">seq1 desc one\nACGT\nAC\n>seq2\nggtt\n";

    #[test]
    fn test_no_inputs() {
        let result = open_fastas(Vec::<Vec<u8>>::new(), &FastaOptions::default());
        assert!(matches!(result, Err(FastaError::NoInputFiles)));
    }

    #[test]
    fn test_single_input_is_single_index() {
        let dataset = open_fastas([FILE], &FastaOptions::default()).unwrap();
        assert!(matches!(dataset, FastaDataset::Single(_)));
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(-1).unwrap().id, "seq2");
    }

    #[test]
    fn test_multiple_inputs_concatenate() {
        let dataset = open_fastas([FILE, FILE, FILE], &FastaOptions::default()).unwrap();
        assert_eq!(dataset.len(), 6);
        assert_eq!(dataset.get_range(Slice::from(1..4)).unwrap().len(), 3);
        assert_eq!(dataset.get_many(&[5, 0]).unwrap()[0].id, "seq2");
    }

    #[test]
    fn test_bad_input_fails_whole_dataset() {
        let result = open_fastas([FILE, &b"no markers\n"[..]], &FastaOptions::default());
        assert!(matches!(result, Err(FastaError::NotFasta { .. })));
    }

    #[test]
    fn test_options_builder() {
        let options = FastaOptions::new()
            .with_encoding(TextEncoding::Utf8)
            .with_access(AccessPattern::Sequential);
        assert_eq!(options.encoding, TextEncoding::Utf8);
        assert_eq!(options.access, AccessPattern::Sequential);
        assert_eq!(FastaOptions::default().encoding, TextEncoding::Ascii);
    }

    #[test]
    fn test_encoding_applies_to_every_input() {
        let utf8 = ">caf\u{00e9}\nAC\n".as_bytes();
        let ascii = open_fastas([utf8, FILE], &FastaOptions::default()).unwrap();
        assert!(matches!(ascii.get(0), Err(FastaError::Encoding { .. })));
        assert_eq!(ascii.get(1).unwrap().id, "seq1");

        let options = FastaOptions::new().with_encoding(TextEncoding::Utf8);
        let dataset = open_fastas([utf8, FILE], &options).unwrap();
        assert_eq!(dataset.get(0).unwrap().id, "caf\u{00e9}");
    }
}
