//! Process-level entry helpers: argument parsing and fatal error reporting

use crate::core::cli::CliArgs;

/// Parse command line arguments, exiting with usage on failure
pub fn get_cli_args() -> CliArgs {
    use clap::Parser;
    CliArgs::parse()
}

/// Print the error with its causes and exit with code 1
pub fn handle_error(error: anyhow::Error) -> ! {
    eprintln!();
    eprintln!("Error: {error}");
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}
