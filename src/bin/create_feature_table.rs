use std::path::PathBuf;
use std::process;

use clap::Parser;

use otu_tools::cli::{init_logger, parse_or_usage};
use otu_tools::create_feature_table;
use otu_tools::progress::spinner;

const USAGE: &str = "Usage: create-feature-table <input_fasta> <output_tsv>";

/// Build a sample-by-feature count table from FASTA headers.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// FASTA file whose headers look like SAMPLEID_x
    input_fasta: PathBuf,
    /// Where to write the tab-separated feature table
    output_tsv: PathBuf,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args: Args = parse_or_usage(USAGE);
    init_logger(args.verbose);

    let pb = spinner("green", "Counting FASTA headers...");
    let result = create_feature_table(&args.input_fasta, &args.output_tsv);
    pb.finish_and_clear();

    match result {
        Ok(_) => println!("Feature table written to {}", args.output_tsv.display()),
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
