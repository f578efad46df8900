//! `ssm2txt`: writes a plain-text report of a SISTEMA project file.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
