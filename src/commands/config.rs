use clap::{Args, Subcommand};

use crate::config;
use crate::error::Result;

#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand, Clone)]
enum ConfigSubcommand {
    /// Parse the config file in effect
    Check,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigSubcommand::Check => {
            match config::validate_config()? {
                Some(path) => println!("config OK: {}", path.display()),
                None => println!("config OK: no config file, using defaults"),
            }
            Ok(())
        }
    }
}
