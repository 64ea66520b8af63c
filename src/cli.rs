//src/cli.rs

use std::process;

use clap::error::ErrorKind;
use clap::Parser;

/// Parses the command line, or prints `usage` to stdout and exits with 1.
/// `--help` and `--version` keep clap's own output.
pub fn parse_or_usage<T: Parser>(usage: &str) -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            println!("{usage}");
            log::debug!("argument error: {}", e.kind());
            process::exit(1);
        }
    }
}

/// Starts `env_logger` at `warn`, raised by each `-v`; `RUST_LOG` overrides.
pub fn init_logger(verbose: u8) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level(verbose)))
        .init();
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
