use clap::Args;

use crate::config::Settings;
use crate::error::Result;
use crate::ollama::OllamaClient;

#[derive(Debug, Args, Clone)]
pub struct LocalArgs {
    /// User prompt
    pub prompt: String,
    /// System instruction
    #[arg(long, default_value = "")]
    pub system: String,
    /// Local model name (defaults to `models.local`)
    #[arg(long)]
    pub model: Option<String>,
}

pub fn run(args: LocalArgs) -> Result<()> {
    let settings = Settings::load()?;
    let client = match args.model {
        Some(model) => OllamaClient::new(settings.ollama_url.as_str(), model),
        None => OllamaClient::from_settings(&settings),
    };
    println!("{}", client.generate(&args.system, &args.prompt)?);
    Ok(())
}
