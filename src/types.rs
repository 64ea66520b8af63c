//src/types.rs

/// One FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// First whitespace-delimited token of the header.
    pub id: String,
    /// Full header text after `>`.
    pub description: String,
    /// Sequence lines joined together.
    pub seq: String,
}

impl SequenceRecord {
    /// Builds a record from a header (without the leading `>`) and its sequence.
    pub fn new(header: &str, seq: impl Into<String>) -> Self {
        let description = header.trim();
        let id = description.split_whitespace().next().unwrap_or("");
        Self {
            id: id.to_string(),
            description: description.to_string(),
            seq: seq.into(),
        }
    }
}

/// Sample a sequence identifier belongs to: everything before the first `_`,
/// or the whole identifier when it has none.
pub fn sample_id_of(identifier: &str) -> &str {
    identifier
        .split_once('_')
        .map(|(sample, _)| sample)
        .unwrap_or(identifier)
}
