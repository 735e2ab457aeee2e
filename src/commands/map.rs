use std::path::{Path, PathBuf};

use clap::Args;

use crate::commands::label;
use crate::config::Settings;
use crate::error::Result;
use crate::files;
use crate::interpret::extract_answer;
use crate::openai::{ChatRequest, OpenAiClient};

pub const MAP_DIR: &str = "map";

const CITY_PROMPT: &str = "You are navigation assistant fluent in topology of Polish cities. \
You analyze maps carefully. You know street names in every Polish city.
Your task is to identify the name of a city in Poland.

Guidelines:
    You will receive four images, each showing a map of part of a city.
    Three images depict the same city in Poland, while one is a decoy designed to mislead you.
    Carefully analyze and list all visible crossroads in each image to aid your reasoning.
    Carefully analyze also landmarks and their locations such as stores, cemeteries, bus stations, \
and other notable features to help identify the city.
    Use your observations to determine which city is represented in the majority of the images.
    Think out loud and provide at least 3 candidates for the city. Then do critique of your reasoning.
    Choose the city for which you have the most hard evidence.
    Provide your answer in the format:
    <ANSWER>City Name</ANSWER>.";

#[derive(Debug, Args, Clone, Default)]
pub struct MapArgs {
    /// Data root holding the `map/` directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Builds the vision request from every file in `dir`.
pub fn city_request(model: &str, dir: &Path) -> Result<ChatRequest> {
    let images = files::list_files(dir)?
        .iter()
        .map(|path| files::read_bytes(path).map(|file| file.content))
        .collect::<Result<Vec<_>>>()?;
    Ok(ChatRequest::vision(model, CITY_PROMPT, "", images).with_temperature(0.1))
}

pub fn run(args: MapArgs) -> Result<()> {
    let settings = Settings::load()?;
    let client = OpenAiClient::from_settings(&settings)?;
    let dir = settings.task_dir(args.data_dir.as_deref(), MAP_DIR);

    let reply = client.chat(&city_request(&settings.models.vision, &dir)?)?;
    println!("{reply}");
    match extract_answer(&reply) {
        Some(city) => println!("{} {city}", label("City:")),
        None => println!("{} not found", label("City:")),
    }
    Ok(())
}
