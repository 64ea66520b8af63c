//src/feature_table.rs

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::fasta::{for_each_header, open_reader};
use crate::types::sample_id_of;

/// Per-sample occurrence counts of every sequence identifier.
///
/// Samples are kept sorted; features are sorted on demand.
#[derive(Debug, Default, Clone)]
pub struct FeatureCountTable {
    samples: BTreeMap<String, AHashMap<String, u64>>,
}

impl FeatureCountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more occurrence of `identifier` under its sample.
    pub fn add(&mut self, identifier: &str) {
        let sample = sample_id_of(identifier);
        let features = self.samples.entry(sample.to_string()).or_default();
        *features.entry(identifier.to_string()).or_insert(0) += 1;
    }

    /// Sample IDs in ascending order.
    pub fn samples(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }

    /// Distinct feature identifiers in ascending order.
    pub fn features(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .samples
            .values()
            .flat_map(|features| features.keys().map(String::as_str))
            .collect();
        set.into_iter().collect()
    }

    pub fn count(&self, sample: &str, feature: &str) -> u64 {
        self.samples
            .get(sample)
            .and_then(|features| features.get(feature))
            .copied()
            .unwrap_or(0)
    }

    /// Occurrences of `feature` across all samples.
    pub fn total_for(&self, feature: &str) -> u64 {
        self.samples
            .values()
            .filter_map(|features| features.get(feature))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Scans the FASTA file at `path` once and counts every header.
pub fn build_feature_table<P: AsRef<Path>>(path: P) -> Result<FeatureCountTable> {
    let path = path.as_ref();
    let reader = open_reader(path)?;

    let mut table = FeatureCountTable::new();
    let headers = for_each_header(reader, |identifier| table.add(identifier))
        .map_err(|e| Error::io(path, e))?;

    log::info!(
        "Counted {} headers across {} sample(s) from {}",
        headers,
        table.samples.len(),
        path.display()
    );
    Ok(table)
}

/// Writes the table as TSV: `#OTU ID` plus sample columns, then one row per feature.
pub fn write_feature_table<W: Write>(table: &FeatureCountTable, mut out: W) -> io::Result<()> {
    let samples: Vec<&str> = table.samples().collect();

    out.write_all(b"#OTU ID")?;
    for sample in &samples {
        write!(out, "\t{sample}")?;
    }
    out.write_all(b"\n")?;

    for feature in table.features() {
        out.write_all(feature.as_bytes())?;
        for sample in &samples {
            write!(out, "\t{}", table.count(sample, feature))?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Creates (or truncates) `path` and writes the table to it.
pub fn write_feature_table_to_path<P: AsRef<Path>>(
    table: &FeatureCountTable,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    write_feature_table(table, BufWriter::new(file)).map_err(|e| Error::io(path, e))
}
