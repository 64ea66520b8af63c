//src/taxon_split.rs

use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::fasta::{read_fasta_records, write_fasta_records};
use crate::taxonomy::{load_taxonomy, TaxonomyMap};
use crate::types::SequenceRecord;

/// Extension appended to every per-taxon output file.
pub const OUTPUT_EXTENSION: &str = "fasta";

/// Maps a taxon label to a filesystem-safe stem: alphanumerics, `.`, `_`
/// and `-` are kept, everything else becomes `_`.
pub fn sanitize_filename(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Records grouped by taxon label.
///
/// Labels iterate in the order they were first seen; records within a
/// label keep input order.
#[derive(Debug, Default, Clone)]
pub struct TaxonGroups {
    groups: Vec<(String, Vec<SequenceRecord>)>,
    index: AHashMap<String, usize>,
}

impl TaxonGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, taxon: &str, record: SequenceRecord) {
        let idx = match self.index.get(taxon) {
            Some(&idx) => idx,
            None => {
                self.groups.push((taxon.to_string(), Vec::new()));
                self.index.insert(taxon.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[idx].1.push(record);
    }

    pub fn get(&self, taxon: &str) -> Option<&[SequenceRecord]> {
        self.index.get(taxon).map(|&idx| self.groups[idx].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SequenceRecord])> {
        self.groups
            .iter()
            .map(|(taxon, records)| (taxon.as_str(), records.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Assigns each record to its taxon. Records without a taxonomy entry are dropped.
pub fn group_by_taxon<I>(records: I, taxonomy: &TaxonomyMap) -> TaxonGroups
where
    I: IntoIterator<Item = SequenceRecord>,
{
    let mut groups = TaxonGroups::new();
    let mut dropped = 0usize;
    for record in records {
        match taxonomy.lookup(&record.id) {
            Some(taxon) => groups.push(taxon, record),
            None => {
                log::debug!("No taxonomy entry for {}", record.id);
                dropped += 1;
            }
        }
    }
    if dropped > 0 {
        log::info!("Dropped {dropped} record(s) without a taxonomy entry");
    }
    groups
}

/// Outcome of a split run.
#[derive(Debug, Clone, Default)]
pub struct SplitSummary {
    /// One per distinct taxon, even when two labels share a file name.
    pub files_created: usize,
    /// Paths written, in write order.
    pub paths: Vec<PathBuf>,
}

/// Writes every group to `<out_dir>/<sanitized label>.fasta`.
///
/// Labels that sanitize to the same name share a file; the group written
/// last wins.
pub fn write_taxon_groups<P: AsRef<Path>>(
    groups: &TaxonGroups,
    out_dir: P,
    line_width: usize,
) -> Result<SplitSummary> {
    let out_dir = out_dir.as_ref();
    let mut summary = SplitSummary::default();
    let mut owners: AHashMap<PathBuf, &str> = AHashMap::new();

    for (taxon, records) in groups.iter() {
        let filename = format!("{}.{}", sanitize_filename(taxon), OUTPUT_EXTENSION);
        let path = out_dir.join(filename);

        if let Some(previous) = owners.insert(path.clone(), taxon) {
            log::info!(
                "Taxa '{}' and '{}' share {}; keeping the records of '{}'",
                previous,
                taxon,
                path.display(),
                taxon
            );
        }
        write_fasta_records(&path, records, line_width)?;
        log::debug!("Wrote {} record(s) to {}", records.len(), path.display());

        summary.files_created += 1;
        summary.paths.push(path);
    }
    Ok(summary)
}

/// Splits `fasta` into one FASTA file per taxon under `out_dir`.
pub fn split_fasta_by_taxon<P, Q, R>(
    fasta: P,
    taxonomy: Q,
    out_dir: R,
    line_width: usize,
) -> Result<SplitSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).map_err(|e| Error::io(out_dir, e))?;

    let taxonomy = load_taxonomy(taxonomy)?;
    let records = read_fasta_records(fasta)?;
    let groups = group_by_taxon(records, &taxonomy);

    write_taxon_groups(&groups, out_dir, line_width)
}
