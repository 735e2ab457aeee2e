use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info};

use crate::centrala::Submitter;
use crate::commands::label;
use crate::config::{Models, Settings};
use crate::error::Result;
use crate::files::{self, LocalFile};
use crate::interpret::{CategorizedFiles, CategoryFlags, categorize};
use crate::openai::{ChatRequest, OpenAiClient, TranscriptionRequest};

pub const FACTORY_DIR: &str = "pliki_z_fabryki";
pub const SORT_TASK: &str = "kategorie";

const CATEGORY_PROMPT: &str = "Categorize the following Polish text into: \
'people' for information about people, \
'nobody' for explicit absence of people, \
'hardware' for hardware details, \
'software' for software details, \
or 'other' for any other content. \
Only respond with 'people' or 'hardware' if certain. \
Exclude software-related content in the final response.";

const OCR_PROMPT: &str = "Extract text from images.";

#[derive(Debug, Args, Clone, Default)]
pub struct SortArgs {
    /// Data root holding the `pliki_z_fabryki/` directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Submit the merged categories as the task answer
    #[arg(long)]
    pub submit: bool,
}

/// Per-modality buckets and their merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortReport {
    pub text: CategorizedFiles,
    pub images: CategorizedFiles,
    pub audio: CategorizedFiles,
    pub merged: CategorizedFiles,
}

/// Asks the chat model which categories `content` belongs to.
pub fn classify(client: &OpenAiClient, model: &str, content: &str) -> Result<CategoryFlags> {
    let request = ChatRequest::text(model, CATEGORY_PROMPT, content).with_max_tokens(20);
    let reply = client.chat(&request)?;
    let flags = categorize(&reply);
    debug!(reply = %reply.trim(), ?flags, "classified");
    Ok(flags)
}

/// Classifies each text and buckets the file names.
pub fn categorize_texts(
    client: &OpenAiClient,
    model: &str,
    texts: &[LocalFile<String>],
) -> Result<CategorizedFiles> {
    let flags = texts
        .iter()
        .map(|text| Ok((text.name.clone(), classify(client, model, &text.content)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(CategorizedFiles::from_flags(flags))
}

/// Reads text out of every `.png` in `dir` through a vision request.
pub fn read_images(
    client: &OpenAiClient,
    model: &str,
    dir: &Path,
) -> Result<Vec<LocalFile<String>>> {
    files::gather(dir, "png")?
        .into_iter()
        .map(|image| {
            let request =
                ChatRequest::vision(model, OCR_PROMPT, "", [image.content]).with_temperature(0.1);
            Ok(LocalFile {
                name: image.name,
                content: client.chat(&request)?,
            })
        })
        .collect()
}

/// Transcribes every `.mp3` in `dir`.
pub fn transcribe_audio(
    client: &OpenAiClient,
    model: &str,
    dir: &Path,
) -> Result<Vec<LocalFile<String>>> {
    files::gather(dir, "mp3")?
        .into_iter()
        .map(|audio| {
            let name = audio.name.clone();
            let content = client.transcribe(&TranscriptionRequest::from_file(model, audio))?;
            Ok(LocalFile { name, content })
        })
        .collect()
}

/// Runs the three modalities in turn and merges the result.
pub fn build_report(client: &OpenAiClient, models: &Models, dir: &Path) -> Result<SortReport> {
    let texts = files::gather_text(dir, "txt")?;
    let text = categorize_texts(client, &models.chat, &texts)?;
    info!(files = texts.len(), "text files categorized");

    let ocr = read_images(client, &models.vision, dir)?;
    let images = categorize_texts(client, &models.chat, &ocr)?;
    info!(files = ocr.len(), "images categorized");

    let transcripts = transcribe_audio(client, &models.transcription, dir)?;
    let audio = categorize_texts(client, &models.chat, &transcripts)?;
    info!(files = transcripts.len(), "recordings categorized");

    let merged = CategorizedFiles::merge([&text, &images, &audio]);
    Ok(SortReport {
        text,
        images,
        audio,
        merged,
    })
}

fn print_buckets(kind: &str, files: &CategorizedFiles) {
    println!("{} {:?}", label(&format!("People related {kind}:")), files.people);
    println!("{} {:?}", label(&format!("Hardware related {kind}:")), files.hardware);
}

pub fn run(args: SortArgs) -> Result<()> {
    let settings = Settings::load()?;
    let client = OpenAiClient::from_settings(&settings)?;
    let submitter = if args.submit {
        Some(Submitter::from_settings(&settings)?)
    } else {
        None
    };
    let dir = settings.task_dir(args.data_dir.as_deref(), FACTORY_DIR);

    let report = build_report(&client, &settings.models, &dir)?;
    print_buckets("files", &report.text);
    print_buckets("images", &report.images);
    print_buckets("audio", &report.audio);
    println!(
        "{} {:?}",
        label("Merged and sorted people related files:"),
        report.merged.people
    );
    println!(
        "{} {:?}",
        label("Merged and sorted hardware related files:"),
        report.merged.hardware
    );

    if let Some(submitter) = submitter {
        let submission = submitter.send_answer(SORT_TASK, &report.merged)?;
        println!("{} {} {}", label("Submission:"), submission.status, submission.body);
    }
    Ok(())
}
