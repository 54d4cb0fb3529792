//! fastaview: random-access, memory-mapped views over FASTA files
//!
//! # Overview
//!
//! fastaview indexes one or more FASTA files by record position without
//! loading them into memory, for data loaders that fetch shuffled batches.
//!
//! ## Key Features
//!
//! - **Memory-mapped**: one scan builds a 16-byte-per-record offset table
//! - **Random access**: fetch by position, negative position, strided range or position list
//! - **Multi-file**: several files addressed as one collection (binary-search mapping)
//! - **Zero-copy views**: re-order or subset any collection through a position list
//!
//! ## Quick Start
//!
//! ```no_run
//! use fastaview::{open_fastas, FastaOptions, PermutedView, RecordCollection};
//!
//! # fn main() -> fastaview::Result<()> {
//! let dataset = open_fastas(["a.fa", "b.fa"], &FastaOptions::default())?;
//!
//! // Validation split: every record at an odd position
//! let odd: Vec<usize> = (1..dataset.len()).step_by(2).collect();
//! let validation = PermutedView::build(&dataset, odd)?;
//!
//! for record in validation.get_many(&[0, 1, 2])? {
//!     println!("{}\t{}", record.id, record.sequence.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`io`]: byte sources and the FASTA index, collection and view types
//! - [`types`]: [`FastaRecord`]
//! - [`error`]: [`FastaError`] and the crate [`Result`] alias

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod io;
pub mod types;

// Re-export commonly used types
pub use error::{FastaError, Result};
pub use io::{
    open_fastas, ByteSource, DataSource, FastaCollection, FastaDataset, FastaIndex,
    FastaOptions, PermutedView, RecordCollection, Slice, TextEncoding,
};
pub use types::FastaRecord;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
