use std::path::PathBuf;
use std::process;

use clap::Parser;

use otu_tools::cli::{init_logger, parse_or_usage};
use otu_tools::fasta::DEFAULT_LINE_WIDTH;
use otu_tools::progress::spinner;
use otu_tools::split_fasta_by_taxon;

const USAGE: &str = "Usage: split-by-taxon <input_fasta> <taxonomy_tsv> <output_dir>";

/// Split a FASTA file into one file per taxon.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// FASTA file to split
    input_fasta: PathBuf,
    /// Tab-separated taxonomy table (header row, then feature ID and taxon)
    taxonomy_tsv: PathBuf,
    /// Directory receiving <taxon>.fasta files; created if missing
    output_dir: PathBuf,
    /// Residues per sequence line in the output (0 disables wrapping)
    #[arg(long, default_value_t = DEFAULT_LINE_WIDTH)]
    line_width: usize,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args: Args = parse_or_usage(USAGE);
    init_logger(args.verbose);

    let pb = spinner("blue", "Splitting records by taxon...");
    let result = split_fasta_by_taxon(
        &args.input_fasta,
        &args.taxonomy_tsv,
        &args.output_dir,
        args.line_width,
    );
    pb.finish_and_clear();

    match result {
        Ok(summary) => println!(
            "Created {} FASTA files in '{}'",
            summary.files_created,
            args.output_dir.display()
        ),
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
