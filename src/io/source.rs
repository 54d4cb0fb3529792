//! Byte sources: read-only, randomly addressable views over file contents
//!
//! The indexing layer only needs two things from its storage: a length and
//! the ability to slice a byte range. [`ByteSource`] captures exactly that,
//! so the index never cares whether bytes come from a memory map or a buffer.
//!
//! [`DataSource`] is the tagged input accepted at the construction boundary:
//! a path, an already-open file, or bytes already in memory. Files are
//! memory-mapped read-only; the operating system pages data in on first
//! touch, so building an index never buffers the file in-process.

use crate::error::{FastaError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only, fixed-length, randomly addressable bytes
pub trait ByteSource {
    /// Total length in bytes
    fn len(&self) -> usize;

    /// Bytes in `range`, or `None` if the range is not within the source
    fn slice(&self, range: Range<usize>) -> Option<&[u8]>;

    /// Check if the source holds zero bytes
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ByteSource for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn slice(&self, range: Range<usize>) -> Option<&[u8]> {
        self.get(range)
    }
}

impl ByteSource for Vec<u8> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn slice(&self, range: Range<usize>) -> Option<&[u8]> {
        self.get(range)
    }
}

impl ByteSource for Mmap {
    fn len(&self) -> usize {
        self.as_ref().len()
    }

    fn slice(&self, range: Range<usize>) -> Option<&[u8]> {
        self.get(range)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn slice(&self, range: Range<usize>) -> Option<&[u8]> {
        (**self).slice(range)
    }
}

/// Expected access pattern for memory-mapped sources
///
/// Forwarded to the kernel as a paging hint (`madvise`) on Unix; ignored
/// elsewhere and for in-memory sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPattern {
    /// Shuffled record access (default; batch loading touches records out of order)
    #[default]
    Random,
    /// Front-to-back iteration
    Sequential,
    /// No hint
    Normal,
}

#[cfg(unix)]
impl From<AccessPattern> for memmap2::Advice {
    fn from(access: AccessPattern) -> Self {
        match access {
            AccessPattern::Random => memmap2::Advice::Random,
            AccessPattern::Sequential => memmap2::Advice::Sequential,
            AccessPattern::Normal => memmap2::Advice::Normal,
        }
    }
}

/// Concrete byte storage produced by [`DataSource::open`]
#[derive(Debug)]
pub enum SourceBuffer {
    /// Read-only memory map of a file
    Mapped(Mmap),
    /// Bytes owned in memory
    Memory(Vec<u8>),
}

impl ByteSource for SourceBuffer {
    fn len(&self) -> usize {
        match self {
            SourceBuffer::Mapped(mmap) => ByteSource::len(mmap),
            SourceBuffer::Memory(bytes) => ByteSource::len(bytes),
        }
    }

    fn slice(&self, range: Range<usize>) -> Option<&[u8]> {
        match self {
            SourceBuffer::Mapped(mmap) => mmap.get(range),
            SourceBuffer::Memory(bytes) => bytes.get(range),
        }
    }
}

/// In-memory source that counts `slice` calls, for checking when bytes are read
#[cfg(test)]
pub(crate) struct CountingSource {
    bytes: Vec<u8>,
    slices: std::cell::Cell<usize>,
}

#[cfg(test)]
impl CountingSource {
    pub(crate) fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            slices: std::cell::Cell::new(0),
        }
    }

    pub(crate) fn slices(&self) -> usize {
        self.slices.get()
    }
}

#[cfg(test)]
impl ByteSource for CountingSource {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn slice(&self, range: Range<usize>) -> Option<&[u8]> {
        self.slices.set(self.slices.get() + 1);
        self.bytes.get(range)
    }
}

/// FASTA input accepted by the construction entry point
///
/// Resolved exactly once, when the input is opened; the index itself only
/// ever sees a [`ByteSource`].
#[derive(Debug)]
pub enum DataSource {
    /// Local file path, memory-mapped on open
    Path(PathBuf),
    /// Already-open file handle, memory-mapped on open
    File(File),
    /// File contents already in memory
    Bytes(Vec<u8>),
}

impl DataSource {
    /// Create a local file data source
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        DataSource::Path(path.as_ref().to_path_buf())
    }

    /// Open the data source and return its bytes
    ///
    /// Zero-length files fail with [`FastaError::EmptySource`] before any
    /// mapping is attempted.
    pub fn open(self, access: AccessPattern) -> Result<SourceBuffer> {
        match self {
            DataSource::Path(path) => {
                let file = File::open(&path).map_err(|e| {
                    FastaError::Io(std::io::Error::new(
                        e.kind(),
                        format!("Failed to open FASTA file {:?}: {}", path, e),
                    ))
                })?;
                map_file(&file, access)
            }
            DataSource::File(file) => map_file(&file, access),
            DataSource::Bytes(bytes) => Ok(SourceBuffer::Memory(bytes)),
        }
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        DataSource::Path(path)
    }
}

impl From<&Path> for DataSource {
    fn from(path: &Path) -> Self {
        DataSource::from_path(path)
    }
}

impl From<&str> for DataSource {
    fn from(path: &str) -> Self {
        DataSource::from_path(path)
    }
}

impl From<File> for DataSource {
    fn from(file: File) -> Self {
        DataSource::File(file)
    }
}

impl From<Vec<u8>> for DataSource {
    fn from(bytes: Vec<u8>) -> Self {
        DataSource::Bytes(bytes)
    }
}

impl From<&[u8]> for DataSource {
    fn from(bytes: &[u8]) -> Self {
        DataSource::Bytes(bytes.to_vec())
    }
}

/// Map a file read-only, applying the access hint where supported
fn map_file(file: &File, access: AccessPattern) -> Result<SourceBuffer> {
    if file.metadata()?.len() == 0 {
        return Err(FastaError::EmptySource);
    }

    // The map is read-only; callers must not truncate the file while it is indexed.
    let mmap = unsafe { Mmap::map(file)? };
    advise(&mmap, access);

    debug!(bytes = mmap.as_ref().len(), ?access, "mapped FASTA file");
    Ok(SourceBuffer::Mapped(mmap))
}

/// Forward the access pattern to the kernel as an madvise hint
#[cfg(unix)]
fn advise(mmap: &Mmap, access: AccessPattern) {
    if let Err(e) = mmap.advise(access.into()) {
        debug!(error = %e, ?access, "madvise hint rejected");
    }
}

#[cfg(not(unix))]
fn advise(_mmap: &Mmap, _access: AccessPattern) {}
