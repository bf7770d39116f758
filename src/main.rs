//! CLI entry point for the pipe tile wave function collapse generator

use clap::Parser;
use pipecollapse::io::cli::{Cli, Generator};

fn main() -> pipecollapse::Result<()> {
    let cli = Cli::parse();
    let mut generator = Generator::new(cli);
    generator.install_logger();
    generator.run().map(|_| ())
}
