//! CLI entry point for cutout-stamped texture generation

use clap::Parser;
use tilestamp::io::cli::Cli;

fn main() -> tilestamp::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    cli.execute()
}
