//! Common types used throughout fastaview

/// A FASTA record decoded from a memory-mapped span
///
/// Records own their text: nothing borrows from the source once the record
/// has been built, so the index can be dropped while records live on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FastaRecord {
    /// Sequence identifier (first whitespace-delimited token of the header)
    pub id: String,
    /// Full header line without the '>' marker, trimmed
    pub description: String,
    /// Residues with every non-word byte removed, upper-cased
    pub sequence: String,
}

impl FastaRecord {
    /// Create a new FASTA record
    pub fn new(id: String, description: String, sequence: String) -> Self {
        Self {
            id,
            description,
            sequence,
        }
    }

    /// Record name, identical to [`id`](Self::id)
    ///
    /// # Examples
    ///
    /// ```
    /// use fastaview::FastaRecord;
    ///
    /// let record = FastaRecord::new(
    ///     "seq1".to_string(),
    ///     "seq1 desc".to_string(),
    ///     "ACGT".to_string(),
    /// );
    /// assert_eq!(record.name(), "seq1");
    /// ```
    pub fn name(&self) -> &str {
        &self.id
    }

    /// Number of residues in the sequence
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check if the record has an empty sequence
    ///
    /// A header directly followed by the next header (or end of file)
    /// yields an empty sequence rather than an error.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
