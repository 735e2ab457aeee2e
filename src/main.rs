use std::io;
use std::process;

use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, shells};
use taskpipe::commands::config::{self, ConfigArgs};
use taskpipe::commands::local::{self, LocalArgs};
use taskpipe::commands::map::{self, MapArgs};
use taskpipe::commands::recordings::{self, RecordingsArgs};
use taskpipe::commands::robot::{self, RobotArgs};
use taskpipe::commands::sort::{self, SortArgs};
use taskpipe::commands::submit::{self, SubmitArgs};

const ROOT_HELP_EXAMPLES: &str = "Examples:\n  taskpipe recordings --data-dir ./data\n  taskpipe sort --submit\n  taskpipe submit robotid https://example.com/robot.png\n  taskpipe completion bash > ~/.local/share/bash-completion/completions/taskpipe";

#[derive(Debug, Parser)]
#[command(
    name = "taskpipe",
    about = "AI-service task drivers",
    version = taskpipe::VERSION,
    after_help = ROOT_HELP_EXAMPLES
)]
struct Cli {
    /// Raise log verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Transcribe recordings and ask for the street name")]
    Recordings(RecordingsArgs),
    #[command(about = "Identify the city shown on map images")]
    Map(MapArgs),
    #[command(about = "Generate an image of the robot from its description")]
    Robot(RobotArgs),
    #[command(about = "Sort factory files into people and hardware")]
    Sort(SortArgs),
    #[command(about = "Submit an answer for a task")]
    Submit(SubmitArgs),
    #[command(about = "Prompt a local model")]
    Local(LocalArgs),
    #[command(about = "Manage local config")]
    Config(ConfigArgs),
    #[command(about = "Generate shell completion script")]
    Completion {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

fn print_completion(shell: CompletionShell) {
    let mut cmd = Cli::command();
    match shell {
        CompletionShell::Bash => generate(shells::Bash, &mut cmd, "taskpipe", &mut io::stdout()),
        CompletionShell::Zsh => generate(shells::Zsh, &mut cmd, "taskpipe", &mut io::stdout()),
        CompletionShell::Fish => generate(shells::Fish, &mut cmd, "taskpipe", &mut io::stdout()),
    }
}

fn main() {
    let cli = Cli::parse();
    taskpipe::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Recordings(args) => recordings::run(args),
        Commands::Map(args) => map::run(args),
        Commands::Robot(args) => robot::run(args),
        Commands::Sort(args) => sort::run(args),
        Commands::Submit(args) => submit::run(args),
        Commands::Local(args) => local::run(args),
        Commands::Config(args) => config::run(args),
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }
}
