use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::files;
use crate::interpret::extract_answer;
use crate::openai::{ChatRequest, OpenAiClient, TranscriptionRequest};

pub const RECORDINGS_DIR: &str = "recordings";
pub const RECORDING_EXT: &str = "m4a";

const STREET_QUESTION: &str = "What is the name of the street of university where Andrzej Maj is a lecturer? \
Provide answer in Polish. Provide your thinking process in steps. Then provide critique. \
Use your general knowledge about Polish university campuses and its street locations. \
Provide only one final street name in <ANSWER> </ANSWER> tags.";

#[derive(Debug, Args, Clone, Default)]
pub struct RecordingsArgs {
    /// Data root holding the `recordings/` directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Transcribes every recording in `dir`, in listing order.
pub fn transcribe_directory(client: &OpenAiClient, model: &str, dir: &Path) -> Result<Vec<String>> {
    files::gather(dir, RECORDING_EXT)?
        .into_iter()
        .map(|file| client.transcribe(&TranscriptionRequest::from_file(model, file)))
        .collect()
}

/// Asks the chat model for the street, with the transcripts as system context.
///
/// Returns the full reply and the tagged answer, if the reply had one.
pub fn ask_street(
    client: &OpenAiClient,
    model: &str,
    transcripts: &str,
) -> Result<(String, Option<String>)> {
    let reply = client.chat(&ChatRequest::text(model, transcripts, STREET_QUESTION))?;
    let answer = extract_answer(&reply);
    Ok((reply, answer))
}

pub fn run(args: RecordingsArgs) -> Result<()> {
    let settings = Settings::load()?;
    let client = OpenAiClient::from_settings(&settings)?;
    let dir = settings.task_dir(args.data_dir.as_deref(), RECORDINGS_DIR);

    let transcripts = transcribe_directory(&client, &settings.models.transcription, &dir)?;
    info!(count = transcripts.len(), "transcripts ready");
    let combined = transcripts.join("\n");
    println!("{combined}");

    let (reply, answer) = ask_street(&client, &settings.models.chat, &combined)?;
    info!(reply = %reply.trim(), "model reasoning");
    match answer {
        Some(street) => println!("{street}"),
        None => println!("Street name could not be determined."),
    }
    Ok(())
}
