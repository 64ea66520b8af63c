use std::fs;
use std::path::Path;
use std::process::Command;

use otu_tools::{sanitize_filename, split_fasta_by_taxon, Error};

const BIN: &str = env!("CARGO_BIN_EXE_split-by-taxon");

fn write_inputs(dir: &Path, fasta: &str, taxonomy: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    let fasta_path = dir.join("reads.fasta");
    let tax_path = dir.join("taxonomy.tsv");
    fs::write(&fasta_path, fasta).unwrap();
    fs::write(&tax_path, taxonomy).unwrap();
    (fasta_path, tax_path)
}

#[test]
fn single_taxon_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let (fasta, tax) = write_inputs(
        dir.path(),
        ">BRK01_1\nACGTACGT\n",
        "Feature ID\tTaxon\nBRK01_1\tBacteria;Firmicutes\n",
    );
    let out_dir = dir.path().join("out");

    let out = Command::new(BIN).arg(&fasta).arg(&tax).arg(&out_dir).output().unwrap();

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        format!("Created 1 FASTA files in '{}'\n", out_dir.display())
    );
    let entries: Vec<_> = fs::read_dir(&out_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        fs::read_to_string(out_dir.join("Bacteria_Firmicutes.fasta")).unwrap(),
        ">BRK01_1\nACGTACGT\n"
    );
}

#[test]
fn unassigned_records_are_dropped_silently() {
    let dir = tempfile::tempdir().unwrap();
    let (fasta, tax) = write_inputs(
        dir.path(),
        ">BRK01_1\nAAAA\n>BRK99_1\nCCCC\n>BRK02_1 sample two\nGGGG\n",
        "Feature ID\tTaxon\tConfidence\nBRK01_1\tArchaea\t0.9\nbroken line\nBRK02_1\tArchaea\t0.8\n",
    );
    let out_dir = dir.path().join("nested").join("out");

    let summary = split_fasta_by_taxon(&fasta, &tax, &out_dir, 60).unwrap();

    assert_eq!(summary.files_created, 1);
    let content = fs::read_to_string(out_dir.join("Archaea.fasta")).unwrap();
    assert_eq!(content, ">BRK01_1\nAAAA\n>BRK02_1 sample two\nGGGG\n");
    for entry in fs::read_dir(&out_dir).unwrap() {
        let text = fs::read_to_string(entry.unwrap().path()).unwrap();
        assert!(!text.contains("BRK99_1"));
    }
}

#[test]
fn every_written_record_belongs_to_its_file() {
    let dir = tempfile::tempdir().unwrap();
    let (fasta, tax) = write_inputs(
        dir.path(),
        ">a\nA\n>b\nC\n>c\nG\n>d\nT\n",
        "id\ttaxon\na\tk__Bacteria; p__Firmicutes\nb\tk__Archaea\nc\tk__Bacteria; p__Firmicutes\n",
    );
    let out_dir = dir.path().join("out");
    fs::create_dir(&out_dir).unwrap();

    let summary = split_fasta_by_taxon(&fasta, &tax, &out_dir, 60).unwrap();

    assert_eq!(summary.files_created, 2);
    let labels = [("k__Bacteria; p__Firmicutes", vec!["a", "c"]), ("k__Archaea", vec!["b"])];
    for (label, ids) in labels {
        let path = out_dir.join(format!("{}.fasta", sanitize_filename(label)));
        let text = fs::read_to_string(path).unwrap();
        let headers: Vec<&str> = text.lines().filter_map(|l| l.strip_prefix('>')).collect();
        assert_eq!(headers, ids);
    }
}

#[test]
fn long_sequences_are_wrapped() {
    let dir = tempfile::tempdir().unwrap();
    let seq = "ACGT".repeat(20);
    let (fasta, tax) = write_inputs(
        dir.path(),
        &format!(">r1\n{}\n{}\n", &seq[..40], &seq[40..]),
        "h\th\nr1\tT\n",
    );
    let out_dir = dir.path().join("out");

    split_fasta_by_taxon(&fasta, &tax, &out_dir, 60).unwrap();

    let text = fs::read_to_string(out_dir.join("T.fasta")).unwrap();
    assert_eq!(text, format!(">r1\n{}\n{}\n", &seq[..60], &seq[60..]));
}

#[test]
fn empty_taxonomy_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let (fasta, tax) = write_inputs(dir.path(), ">r1\nA\n", "");

    let err = split_fasta_by_taxon(&fasta, &tax, dir.path().join("out"), 60).unwrap_err();
    assert!(matches!(err, Error::MissingTaxonomyHeader { .. }));
}

#[test]
fn missing_arguments_fail() {
    let out = Command::new(BIN).arg("only.fasta").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8(out.stdout).unwrap().starts_with("Usage: split-by-taxon"));
}

#[test]
fn missing_taxonomy_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = dir.path().join("reads.fasta");
    fs::write(&fasta, ">r1\nA\n").unwrap();

    let out = Command::new(BIN)
        .arg(&fasta)
        .arg(dir.path().join("missing.tsv"))
        .arg(dir.path().join("out"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn colliding_labels_overwrite_quietly() {
    let dir = tempfile::tempdir().unwrap();
    let (fasta, tax) = write_inputs(
        dir.path(),
        ">r1\nAAAA\n>r2\nCCCC\n",
        "id\ttaxon\nr1\tA;B\nr2\tA/B\n",
    );
    let out_dir = dir.path().join("out");

    let out = Command::new(BIN)
        .env_remove("RUST_LOG")
        .arg(&fasta)
        .arg(&tax)
        .arg(&out_dir)
        .output()
        .unwrap();

    assert!(out.status.success());
    assert!(out.stderr.is_empty());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        format!("Created 2 FASTA files in '{}'\n", out_dir.display())
    );
    assert_eq!(
        fs::read_to_string(out_dir.join("A_B.fasta")).unwrap(),
        ">r2\nCCCC\n"
    );
}

#[test]
fn usage_output_matches_between_tools() {
    let split = Command::new(BIN).output().unwrap();
    let table = Command::new(env!("CARGO_BIN_EXE_create-feature-table")).output().unwrap();

    for out in [&split, &table] {
        assert_eq!(out.status.code(), Some(1));
        assert_eq!(String::from_utf8_lossy(&out.stdout).lines().count(), 1);
        assert!(out.stderr.is_empty());
    }
}
