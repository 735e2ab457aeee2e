use reqwest::blocking::{Client, RequestBuilder, Response};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::openai::audio::{TranscriptionRequest, TranscriptionResponse};
use crate::openai::chat::{ChatCompletionResponse, ChatRequest};
use crate::openai::images::{ImageRequest, ImagesResponse};

/// Blocking client for an OpenAI-compatible API.
///
/// One instance is built per run and handed to whatever needs it.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Builds a client from `OPENAI_API_KEY` / `OPENAI_BASE_URL`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.openai_api_key()?;
        Ok(Self::new(api_key, settings.openai_base_url.as_str()))
    }

    /// Sends a chat or vision request and returns the reply text.
    ///
    /// A reply whose first choice carries no content comes back as an empty
    /// string; a reply with no choices at all is an error.
    pub fn chat(&self, request: &ChatRequest) -> Result<String> {
        debug!(model = %request.model, messages = request.messages.len(), "chat request");
        let response = self.send(self.http.post(self.url("chat/completions")).json(request))?;
        let body: ChatCompletionResponse = response.json()?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or(Error::MissingField { field: "choices" })?;
        let content = choice.message.content.unwrap_or_default();
        if content.is_empty() {
            warn!(model = %request.model, "chat reply had no content");
        }
        Ok(content)
    }

    /// Uploads audio and returns the transcript text.
    pub fn transcribe(&self, request: &TranscriptionRequest) -> Result<String> {
        info!(file = %request.file_name, model = %request.model, "transcribing");
        let form = request.to_form()?;
        let response = self.send(
            self.http
                .post(self.url("audio/transcriptions"))
                .multipart(form),
        )?;
        let body: TranscriptionResponse = response.json()?;
        Ok(body.text)
    }

    /// Generates one image and returns its URL.
    pub fn generate_image(&self, request: &ImageRequest) -> Result<String> {
        info!(model = %request.model, size = %request.size, "generating image");
        let response = self.send(self.http.post(self.url("images/generations")).json(request))?;
        let body: ImagesResponse = response.json()?;
        body.data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or(Error::MissingField {
                field: "data[0].url",
            })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.bearer_auth(&self.api_key).send()?;
        ensure_success(response)
    }
}

/// Turns a non-2xx reply into [`Error::Api`], keeping the body text.
pub(crate) fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(Error::Api { status, body })
}
