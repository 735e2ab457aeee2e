use std::process;

use clap::Parser;
use taskpipe::commands::recordings::{self, RecordingsArgs};

#[derive(Debug, Parser)]
#[command(
    name = "tprecord",
    about = "Transcribe recordings and ask for the street name",
    version = taskpipe::VERSION
)]
struct Cli {}

fn main() {
    let _ = Cli::parse();
    taskpipe::logging::init(0);
    if let Err(err) = recordings::run(RecordingsArgs::default()) {
        eprintln!("{err}");
        process::exit(1);
    }
}
