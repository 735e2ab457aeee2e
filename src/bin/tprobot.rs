use std::process;

use clap::Parser;
use taskpipe::commands::robot::{self, RobotArgs};

#[derive(Debug, Parser)]
#[command(
    name = "tprobot",
    about = "Generate an image of the robot from its description",
    version = taskpipe::VERSION
)]
struct Cli {}

fn main() {
    let _ = Cli::parse();
    taskpipe::logging::init(0);
    if let Err(err) = robot::run(RobotArgs::default()) {
        eprintln!("{err}");
        process::exit(1);
    }
}
