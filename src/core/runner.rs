//! Command dispatch
//!
//! Handles the different subcommands of the binary

use crate::core::cli::{BuildArgs, CliArgs, Command};
use crate::core::info::run_info;
use crate::font_source::UfoFont;
use crate::logging;
use crate::pipeline::{run_build, RunReport};
use anyhow::Result;

/// Run the subcommand selected on the command line
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    logging::init(cli_args.debug())?;

    match &cli_args.command {
        Command::Build(args) => build_font(args).map(|_| ()),
        Command::Info(args) => run_info(args),
    }
}

/// Build the icon font with the UFO/TrueType backend
pub fn build_font(args: &BuildArgs) -> Result<RunReport> {
    let mut font = UfoFont::new(args.font_family.clone());
    let report = run_build(&mut font, args)?;
    Ok(report)
}
