// Entrypoint for the CLI application.
// - Parses arguments, sets up logging on stderr and hands off to
//   `cli::run`.
// - Any error, including a malformed command line, ends the process with
//   `ERROR: <message>` and status 1.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use pastectl::cli::{self, Cli};
use tracing::Level;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match cli::usage_error(&err) {
            Some(message) => {
                eprintln!("ERROR: {message}");
                return ExitCode::FAILURE;
            }
            None => err.exit(),
        },
    };
    init_logging(cli.verbose);

    match cli::run(cli, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
