//! Error types for fastaview

use thiserror::Error;

/// Result type alias for fastaview operations
pub type Result<T> = std::result::Result<T, FastaError>;

/// Error types that can occur while indexing or reading FASTA files
#[derive(Debug, Error)]
pub enum FastaError {
    /// I/O error while opening or mapping a source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Factory called with an empty list of inputs
    #[error("No FASTA inputs given")]
    NoInputFiles,

    /// Source contains zero bytes
    #[error("FASTA source is empty")]
    EmptySource,

    /// Source contains no record marker at all
    #[error("Not a FASTA source: no '>' record marker found in {len} bytes")]
    NotFasta {
        /// Length of the scanned source in bytes
        len: usize,
    },

    /// Record span without a line terminator after its header
    #[error("Malformed FASTA record at byte {offset}: {msg}")]
    MalformedRecord {
        /// Byte offset of the record marker within its source
        offset: usize,
        /// Error message
        msg: String,
    },

    /// Bytes not valid under the configured text encoding
    #[error("Invalid {encoding} text in record at byte {offset}")]
    Encoding {
        /// Name of the configured encoding
        encoding: &'static str,
        /// Byte offset of the record marker within its source
        offset: usize,
    },

    /// Position outside the bounds of a collection
    #[error("Index {index} out of range for collection of length {len}")]
    IndexOutOfRange {
        /// Requested position, as given by the caller
        index: isize,
        /// Length of the collection
        len: usize,
    },

    /// Composite built from zero children
    #[error("Cannot build a collection from zero FASTA indices")]
    EmptyCollection,

    /// Permuted view built from zero positions
    #[error("Cannot build a view from an empty index list")]
    EmptyIndexList,

    /// Text encoding label not recognised
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    /// Invalid slice parameters
    #[error("Invalid slice: {0}")]
    InvalidSlice(String),
}
