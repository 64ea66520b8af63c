// src/lib.rs
pub mod error;
pub mod types;
pub mod fasta;
pub mod taxonomy;
pub mod feature_table;
pub mod taxon_split;
pub mod progress;
pub mod cli;

use std::path::Path;

pub use crate::error::{Error, Result};
pub use crate::feature_table::{build_feature_table, write_feature_table_to_path, FeatureCountTable};
pub use crate::taxon_split::{sanitize_filename, split_fasta_by_taxon, SplitSummary};
pub use crate::types::{sample_id_of, SequenceRecord};

/// Counts the headers of `input_fasta` per sample and writes the TSV feature
/// table to `output_tsv`, replacing any existing file.
pub fn create_feature_table<P: AsRef<Path>, Q: AsRef<Path>>(
    input_fasta: P,
    output_tsv: Q,
) -> Result<FeatureCountTable> {
    let table = build_feature_table(input_fasta)?;
    write_feature_table_to_path(&table, &output_tsv)?;
    log::info!("Wrote feature table to {}", output_tsv.as_ref().display());
    Ok(table)
}
