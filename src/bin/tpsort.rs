use std::process;

use clap::Parser;
use taskpipe::commands::sort::{self, SortArgs};

#[derive(Debug, Parser)]
#[command(
    name = "tpsort",
    about = "Sort factory files into people and hardware",
    version = taskpipe::VERSION
)]
struct Cli {}

fn main() {
    let _ = Cli::parse();
    taskpipe::logging::init(0);
    if let Err(err) = sort::run(SortArgs::default()) {
        eprintln!("{err}");
        process::exit(1);
    }
}
