//! `compose-env` entry-point: parse flags, compose configuration, run the
//! selected command.

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use compose_env::cli::CommandLine;
use compose_env::commands::run;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let cli = CommandLine::parse();
    let mut stdout = io::stdout().lock();
    run(&cli, &mut stdout).map_err(color_eyre::eyre::Report::from)
}
