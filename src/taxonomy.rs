//src/taxonomy.rs

use std::io::{self, BufRead};
use std::path::Path;

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::fasta::open_reader;

/// Feature ID -> taxon label.
#[derive(Debug, Default, Clone)]
pub struct TaxonomyMap {
    labels: AHashMap<String, String>,
}

impl TaxonomyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feature_id: impl Into<String>, taxon: impl Into<String>) {
        self.labels.insert(feature_id.into(), taxon.into());
    }

    /// Taxon label for `feature_id`. An empty label counts as unassigned.
    pub fn lookup(&self, feature_id: &str) -> Option<&str> {
        self.labels
            .get(feature_id)
            .map(String::as_str)
            .filter(|taxon| !taxon.is_empty())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Parses a taxonomy table in the format:
/// ```text
/// Feature ID\tTaxon[\t...]
/// <feature_id>\t<taxon>[\t<ignored>...]
/// ```
/// The first line is a header and is discarded. Lines with fewer than two
/// tab-separated fields are skipped. Returns `None` if the stream is empty.
pub fn parse_taxonomy<R: BufRead>(reader: R) -> io::Result<Option<TaxonomyMap>> {
    let mut lines = reader.lines();
    match lines.next() {
        Some(header) => {
            header?;
        }
        None => return Ok(None),
    }

    let mut map = TaxonomyMap::new();
    let mut skipped = 0usize;
    for line_result in lines {
        let line = line_result?;
        let parts: Vec<&str> = line.trim().split('\t').collect();

        // Skip malformed lines
        if parts.len() < 2 {
            skipped += 1;
            continue;
        }
        map.insert(parts[0], parts[1]);
    }
    if skipped > 0 {
        log::debug!("Skipped {skipped} taxonomy line(s) with fewer than two columns");
    }
    Ok(Some(map))
}

/// Loads the taxonomy table at `path`.
pub fn load_taxonomy<P: AsRef<Path>>(path: P) -> Result<TaxonomyMap> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    let map = parse_taxonomy(reader)
        .map_err(|e| Error::io(path, e))?
        .ok_or_else(|| Error::MissingTaxonomyHeader {
            path: path.to_path_buf(),
        })?;
    log::info!("Loaded {} taxonomy entries from {}", map.len(), path.display());
    Ok(map)
}
