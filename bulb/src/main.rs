//! # bulb
//!
//! Entry point for the `bulb` binary. Parses the command line, installs the
//! tracing subscriber, and hands over to [`bulb::app::run`].

use anyhow::Result;
use bulb::cli::Cli;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    bulb::app::init_tracing();
    bulb::app::run(cli)
}
