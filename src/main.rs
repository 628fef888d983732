//! recordq CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`. Errors go to stderr
//! and exit non-zero; everything else lives in the CLI module.

use recordq::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
