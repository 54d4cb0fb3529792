//! I/O module: byte sources and FASTA random access
//!
//! Files are memory-mapped rather than streamed: the index keeps byte
//! offsets only, and record bytes are paged in by the operating system on
//! first touch.

pub mod fasta;
pub mod source;

pub use fasta::{
    open_fastas, FastaCollection, FastaDataset, FastaIndex, FastaOptions, PermutedView,
    RecordCollection, Slice, TextEncoding,
};
pub use source::{AccessPattern, ByteSource, DataSource, SourceBuffer};
