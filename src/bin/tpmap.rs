use std::process;

use clap::Parser;
use taskpipe::commands::map::{self, MapArgs};

#[derive(Debug, Parser)]
#[command(
    name = "tpmap",
    about = "Identify the city shown on map images",
    version = taskpipe::VERSION
)]
struct Cli {}

fn main() {
    let _ = Cli::parse();
    taskpipe::logging::init(0);
    if let Err(err) = map::run(MapArgs::default()) {
        eprintln!("{err}");
        process::exit(1);
    }
}
