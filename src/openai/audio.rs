use std::path::Path;

use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::Result;
use crate::files::LocalFile;

/// Speech-to-text upload: audio bytes plus the model name, sent as multipart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub model: String,
    pub file_name: String,
    pub audio: Vec<u8>,
}

impl TranscriptionRequest {
    pub fn new(model: impl Into<String>, file_name: impl Into<String>, audio: Vec<u8>) -> Self {
        Self {
            model: model.into(),
            file_name: file_name.into(),
            audio,
        }
    }

    pub fn from_file(model: impl Into<String>, file: LocalFile<Vec<u8>>) -> Self {
        Self::new(model, file.name, file.content)
    }

    pub(crate) fn to_form(&self) -> Result<Form> {
        let part = Part::bytes(self.audio.clone())
            .file_name(self.file_name.clone())
            .mime_str(audio_mime(&self.file_name))?;
        Ok(Form::new().text("model", self.model.clone()).part("file", part))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranscriptionResponse {
    pub text: String,
}

fn audio_mime(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("mp3") | Some("mpeg") | Some("mpga") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("webm") => "audio/webm",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_follows_extension() {
        assert_eq!(audio_mime("adam.m4a"), "audio/mp4");
        assert_eq!(audio_mime("2024-11-12_report-10.MP3"), "audio/mpeg");
        assert_eq!(audio_mime("noext"), "application/octet-stream");
    }

    #[test]
    fn from_file_keeps_name_and_bytes() {
        let request = TranscriptionRequest::from_file(
            "whisper-1",
            LocalFile {
                name: "rafal.m4a".to_string(),
                content: vec![1, 2, 3],
            },
        );
        assert_eq!(request.file_name, "rafal.m4a");
        assert_eq!(request.audio, vec![1, 2, 3]);
        assert!(request.to_form().is_ok());
    }
}
