// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod cli;
mod config;
mod logging;
mod output;

use clap::Parser;
use eyre::Result;

use crate::cli::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(cli.verbose);
    cli.run()
}
