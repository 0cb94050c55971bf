//! `taam`: annotate, search and count the cantillation marks of Biblical
//! Hebrew text files.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
