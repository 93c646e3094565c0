//! CLI entry point for grid snapping of pixel-art images

use clap::Parser;
use pixelsnap::io::cli::{Cli, FileProcessor};

fn main() -> pixelsnap::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.init_logging();
    processor.process()
}
